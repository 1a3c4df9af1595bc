//! Wire model of the inspector protocol
//!
//! Messages arrive from the inspector as tagged JSON objects; nested
//! payloads (actions, state snapshots) are JSON-encoded strings inside the
//! envelope. Outbound traffic is the connection's `init`/`send` calls, so
//! only the inbound envelope needs a serde model here, plus the helpers for
//! the `_meta` diagnostic annotation and the inspector's lifted-state shape.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Key under which reported state snapshots carry diagnostics.
pub const META_KEY: &str = "_meta";

/// Key under which the dispatch-site stack trace is recorded.
pub const STACK_TRACE_KEY: &str = "stackTrace";

/// A message pushed by the inspector over the connection
///
/// The inspector also emits lifecycle traffic beyond these two shapes; it
/// decodes to [`InspectorMessage::Unknown`] and is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InspectorMessage {
    /// Request to dispatch an action; the payload is a JSON-encoded action
    #[serde(rename = "ACTION")]
    Action { payload: String },

    /// Monitor command driving the store from the inspector's timeline
    #[serde(rename = "DISPATCH")]
    Dispatch {
        payload: MonitorCommand,
        /// JSON-encoded state snapshot, present for rollback and jumps
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<String>,
    },

    /// Any other message type the inspector emits
    #[serde(other)]
    Unknown,
}

/// The command carried by a `DISPATCH` message
///
/// Commands beyond the supported set decode to
/// [`MonitorCommand::Unsupported`] and are ignored. Extra envelope fields
/// (action ids, timestamps) are tolerated and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorCommand {
    /// Restore the baseline captured at bridge setup
    Reset,
    /// Make the current state the new baseline
    Commit,
    /// Restore the state carried in the message and rebaseline
    Rollback,
    /// Time-jump to the state carried in the message
    JumpToState,
    /// Time-jump to the state recorded for an action
    JumpToAction,
    /// Replace state from an imported inspector timeline
    ImportState {
        #[serde(rename = "nextLiftedState")]
        next_lifted_state: Value,
    },
    /// Any monitor command outside the supported set
    #[serde(other)]
    Unsupported,
}

/// Attach the dispatch-site stack trace to a reported state snapshot.
///
/// Non-object snapshots have nowhere to carry the annotation and are sent
/// as-is.
pub fn annotate_with_trace(state: Value, stack_trace: String) -> Value {
    match state {
        Value::Object(mut map) => {
            map.insert(META_KEY.to_string(), json!({ STACK_TRACE_KEY: stack_trace }));
            Value::Object(map)
        }
        other => other,
    }
}

/// Read the stack-trace annotation off a state snapshot, if present.
pub fn stack_trace_annotation(state: &Value) -> Option<&str> {
    state.get(META_KEY)?.get(STACK_TRACE_KEY)?.as_str()
}

/// The last computed state of an inspector lifted-state payload.
///
/// The lifted state is opaque to this crate except for this one path:
/// `computedStates[last].state`. `None` for an empty or missing sequence.
pub fn last_computed_state(lifted_state: &Value) -> Option<&Value> {
    lifted_state
        .get("computedStates")?
        .as_array()?
        .last()?
        .get("state")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_action_message() {
        let message: InspectorMessage =
            serde_json::from_str(r#"{"type":"ACTION","payload":"{\"type\":\"incrementOne\"}"}"#)
                .unwrap();
        assert_eq!(
            message,
            InspectorMessage::Action {
                payload: r#"{"type":"incrementOne"}"#.to_string()
            }
        );
    }

    #[test]
    fn test_decode_reset_command() {
        let message: InspectorMessage =
            serde_json::from_str(r#"{"type":"DISPATCH","payload":{"type":"RESET"}}"#).unwrap();
        assert_eq!(
            message,
            InspectorMessage::Dispatch {
                payload: MonitorCommand::Reset,
                state: None
            }
        );
    }

    #[test]
    fn test_decode_jump_with_extra_fields() {
        let message: InspectorMessage = serde_json::from_str(
            r#"{
                "type": "DISPATCH",
                "payload": {"type": "JUMP_TO_ACTION", "actionId": 4},
                "state": "{\"value\":2}"
            }"#,
        )
        .unwrap();
        assert_eq!(
            message,
            InspectorMessage::Dispatch {
                payload: MonitorCommand::JumpToAction,
                state: Some(r#"{"value":2}"#.to_string())
            }
        );
    }

    #[test]
    fn test_decode_import_state() {
        let message: InspectorMessage = serde_json::from_str(
            r#"{
                "type": "DISPATCH",
                "payload": {
                    "type": "IMPORT_STATE",
                    "nextLiftedState": {"computedStates": [{"state": {"value": 9}}]}
                }
            }"#,
        )
        .unwrap();
        let InspectorMessage::Dispatch {
            payload: MonitorCommand::ImportState { next_lifted_state },
            ..
        } = message
        else {
            panic!("expected an IMPORT_STATE command");
        };
        assert_eq!(
            last_computed_state(&next_lifted_state),
            Some(&json!({"value": 9}))
        );
    }

    #[test]
    fn test_unknown_message_type_is_tolerated() {
        let message: InspectorMessage =
            serde_json::from_str(r#"{"type":"START"}"#).unwrap();
        assert_eq!(message, InspectorMessage::Unknown);
    }

    #[test]
    fn test_unsupported_command_is_tolerated() {
        let message: InspectorMessage = serde_json::from_str(
            r#"{"type":"DISPATCH","payload":{"type":"TOGGLE_ACTION","id":3}}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            InspectorMessage::Dispatch {
                payload: MonitorCommand::Unsupported,
                state: None
            }
        );
    }

    #[test]
    fn test_annotate_object_state() {
        let annotated = annotate_with_trace(json!({"value": 1}), "at main.rs:10".into());
        assert_eq!(
            annotated,
            json!({"value": 1, "_meta": {"stackTrace": "at main.rs:10"}})
        );
        assert_eq!(stack_trace_annotation(&annotated), Some("at main.rs:10"));
    }

    #[test]
    fn test_annotate_non_object_state() {
        let annotated = annotate_with_trace(json!(42), "trace".into());
        assert_eq!(annotated, json!(42));
        assert_eq!(stack_trace_annotation(&annotated), None);
    }

    #[test]
    fn test_last_computed_state_empty_sequence() {
        assert_eq!(last_computed_state(&json!({"computedStates": []})), None);
        assert_eq!(last_computed_state(&json!({})), None);
    }
}
