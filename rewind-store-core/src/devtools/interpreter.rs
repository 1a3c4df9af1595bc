//! Inbound command interpreter
//!
//! Applies messages pushed by the inspector to the store: re-dispatched
//! actions go through the reducer, monitor commands (reset, commit,
//! rollback, jumps, import) bypass it via the replacement path. Stateless:
//! each message is decoded, applied to completion, and dropped.
//!
//! Decode policy is strict parse-or-drop. A malformed payload is logged at
//! the decode site and the command counts as fully handled; nothing
//! propagates across the connection boundary and no partial effect is left
//! behind.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::devtools::protocol::{self, InspectorMessage, MonitorCommand};
use crate::store::{Store, StoreState};
use crate::Action;

impl<S: StoreState, A: Action> Store<S, A> {
    /// Apply one message received from the inspector connection
    ///
    /// The host loop drains the stream from
    /// [`inspector_messages`](Store::inspector_messages) and feeds each
    /// message here; every message runs to completion before the next one
    /// is taken, preserving the single-threaded mutation model.
    pub fn handle_inspector_message(&mut self, message: InspectorMessage) {
        match message {
            InspectorMessage::Action { payload } => {
                let Some(action) = decode::<A>(&payload, "action") else {
                    return;
                };
                if let Err(err) = self.dispatch(action) {
                    error!(%err, "inspector-injected action was rejected by the reducer");
                }
            }
            InspectorMessage::Dispatch { payload, state } => {
                self.apply_monitor_command(payload, state);
            }
            InspectorMessage::Unknown => {
                debug!("ignoring unrecognized inspector message type");
            }
        }
    }

    fn apply_monitor_command(&mut self, command: MonitorCommand, state: Option<String>) {
        match command {
            MonitorCommand::Reset => {
                let Some(baseline) = self.bridge.as_ref().map(|bridge| bridge.baseline.clone())
                else {
                    return;
                };
                self.replace_state(baseline);
                self.rebaseline_connection();
            }

            MonitorCommand::Commit => {
                self.rebaseline_connection();
            }

            MonitorCommand::Rollback => {
                let Some(decoded) = decode_state(state.as_deref(), "rollback state") else {
                    return;
                };
                if let Err(err) = self.set_state(decoded) {
                    error!(%err, "rollback state was rejected");
                    return;
                }
                self.rebaseline_connection();
            }

            MonitorCommand::JumpToState | MonitorCommand::JumpToAction => {
                let Some(decoded) = decode_state(state.as_deref(), "jump state") else {
                    return;
                };
                // Observability only: the trace recorded where the jump
                // target was originally dispatched.
                if let Some(stack_trace) = protocol::stack_trace_annotation(&decoded) {
                    if !stack_trace.is_empty() {
                        info!(%stack_trace, "jump target dispatch site");
                    }
                }
                if let Err(err) = self.set_state(decoded) {
                    error!(%err, "jump state was rejected");
                }
            }

            MonitorCommand::ImportState { next_lifted_state } => {
                let Some(last) = protocol::last_computed_state(&next_lifted_state).cloned() else {
                    // Empty timeline: nothing to import, nothing to echo.
                    return;
                };
                if let Err(err) = self.set_state(last) {
                    error!(%err, "imported state was rejected");
                    return;
                }
                if let Some(bridge) = &self.bridge {
                    bridge.connection.send(None, next_lifted_state);
                }
            }

            MonitorCommand::Unsupported => {
                debug!("ignoring unsupported monitor command");
            }
        }
    }

    fn rebaseline_connection(&self) {
        if let Some(bridge) = &self.bridge {
            bridge.rebaseline(self.state());
        }
    }
}

/// Parse a JSON payload, logging and swallowing malformed input.
fn decode<T: DeserializeOwned>(payload: &str, what: &'static str) -> Option<T> {
    match serde_json::from_str(payload) {
        Ok(value) => Some(value),
        Err(err) => {
            error!(%err, payload = what, "could not parse json from the inspector");
            None
        }
    }
}

/// Decode the optional `state` field of a DISPATCH message.
fn decode_state(state: Option<&str>, what: &'static str) -> Option<Value> {
    let Some(raw) = state else {
        error!(payload = what, "inspector command is missing its state payload");
        return None;
    };
    decode(raw, what)
}
