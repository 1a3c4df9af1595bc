//! Discovery of the inspector endpoint and bridge setup
//!
//! The host environment provides the actual transport: it implements
//! [`InspectorEndpoint`] and [`InspectorConnection`] over whatever channel
//! reaches the inspector process, then installs the endpoint in the global
//! registry (or injects it through the store builder). A store built while
//! no endpoint is available runs un-bridged; every reporting path becomes a
//! complete no-op.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::devtools::protocol::{self, InspectorMessage};
use crate::devtools::trace::TraceCapture;
use crate::store::StoreState;
use crate::Action;

/// Options passed to the inspector when opening a connection
///
/// Defaults to the empty options object. `name` labels the store instance
/// in the inspector UI when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A logical channel to the external inspector
///
/// Implemented by the host's transport adapter. All calls are
/// fire-and-forget from the store's point of view; delivery failures are
/// the adapter's concern and must not surface here.
pub trait InspectorConnection: Send + Sync {
    /// Establish `state` as the inspector's baseline snapshot
    fn init(&self, state: Value);

    /// Report one transition (`action` present), or echo a lifted-state
    /// payload verbatim (`action` absent)
    fn send(&self, action: Option<Value>, state: Value);

    /// Hand over the inbound message stream
    ///
    /// Called once at bridge setup. `None` when the adapter does not
    /// deliver inspector messages, or when the stream was already claimed.
    fn subscribe(&self) -> Option<mpsc::UnboundedReceiver<InspectorMessage>>;
}

/// An inspector endpoint provided by the host environment
pub trait InspectorEndpoint: Send + Sync {
    /// Open a connection scoped to one store instance
    fn connect(&self, options: ConnectOptions) -> Arc<dyn InspectorConnection>;
}

static ENDPOINT: RwLock<Option<Arc<dyn InspectorEndpoint>>> = RwLock::new(None);

/// Install the process-wide inspector endpoint
///
/// Stores built afterwards (without an explicit builder endpoint) connect
/// through it. The registry is the Rust analogue of the inspector's
/// host-injected global handle.
pub fn install_endpoint(endpoint: Arc<dyn InspectorEndpoint>) {
    *ENDPOINT.write() = Some(endpoint);
}

/// The currently installed endpoint, if any
pub fn installed_endpoint() -> Option<Arc<dyn InspectorEndpoint>> {
    ENDPOINT.read().clone()
}

/// Remove the installed endpoint
pub fn clear_endpoint() {
    *ENDPOINT.write() = None;
}

/// Established bridge, owned by the store for its whole lifetime
///
/// There is no explicit teardown: dropping the store drops the connection
/// handle.
pub(crate) struct Bridge<S> {
    pub(crate) connection: Arc<dyn InspectorConnection>,
    /// State captured at setup; RESET restores it.
    pub(crate) baseline: S,
    /// Inbound stream until the host claims it.
    pub(crate) inbound: Option<mpsc::UnboundedReceiver<InspectorMessage>>,
    trace_capture: TraceCapture,
}

/// Establish the bridge for a store being built.
///
/// Absence of an endpoint is not an error: it is logged once and the store
/// proceeds in pass-through mode. A baseline that cannot be encoded can
/// never be mirrored, so that also degrades to pass-through mode.
pub(crate) fn setup<S: StoreState>(
    initial: &S,
    endpoint: Option<Arc<dyn InspectorEndpoint>>,
    trace_capture: TraceCapture,
    options: ConnectOptions,
) -> Option<Bridge<S>> {
    let Some(endpoint) = endpoint else {
        warn!("no inspector endpoint available; running without time-travel debugging");
        return None;
    };

    let snapshot = match serde_json::to_value(initial) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!(%err, "initial state is not encodable; running without time-travel debugging");
            return None;
        }
    };

    let connection = endpoint.connect(options);
    connection.init(snapshot);

    let inbound = connection.subscribe();
    if inbound.is_none() {
        warn!("inspector connection did not provide an inbound message stream");
    }

    Some(Bridge {
        connection,
        baseline: initial.clone(),
        inbound,
        trace_capture,
    })
}

impl<S: Serialize> Bridge<S> {
    /// Report one accepted transition to the inspector.
    ///
    /// The snapshot carries the dispatch-site stack trace under `_meta`.
    /// Encoding failures are logged and the report is skipped; the dispatch
    /// itself already succeeded and must not be disturbed.
    pub(crate) fn report<A: Action>(&self, action: &A, state: &S) {
        let action_value = match serde_json::to_value(action) {
            Ok(value) => value,
            Err(err) => {
                error!(%err, action = action.name(), "failed to encode action for the inspector");
                return;
            }
        };
        let state_value = match serde_json::to_value(state) {
            Ok(value) => value,
            Err(err) => {
                error!(%err, action = action.name(), "failed to encode state for the inspector");
                return;
            }
        };
        let annotated = protocol::annotate_with_trace(state_value, (self.trace_capture)());
        self.connection.send(Some(action_value), annotated);
    }

    /// Re-send `state` as the inspector's new baseline.
    pub(crate) fn rebaseline(&self, state: &S) {
        match serde_json::to_value(state) {
            Ok(value) => self.connection.init(value),
            Err(err) => error!(%err, "failed to encode state for a new inspector baseline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::devtools::trace;
    use crate::testing::{ConnectionCall, RecordingEndpoint};

    #[test]
    fn test_setup_without_endpoint() {
        let bridge = setup::<i64>(&0, None, trace::no_trace, ConnectOptions::default());
        assert!(bridge.is_none());
    }

    #[test]
    fn test_setup_establishes_baseline_and_stream() {
        let endpoint = RecordingEndpoint::new();
        let connection = endpoint.connection();

        let mut bridge = setup(
            &7i64,
            Some(endpoint as Arc<dyn InspectorEndpoint>),
            trace::no_trace,
            ConnectOptions::default(),
        )
        .unwrap();

        assert_eq!(connection.calls(), vec![ConnectionCall::Init(json!(7))]);
        assert_eq!(bridge.baseline, 7);
        assert!(bridge.inbound.take().is_some());
    }

    #[test]
    fn test_connect_options_pass_through() {
        let endpoint = RecordingEndpoint::new();

        let options = ConnectOptions {
            name: Some("checkout".into()),
        };
        setup(
            &1i64,
            Some(endpoint.clone() as Arc<dyn InspectorEndpoint>),
            trace::no_trace,
            options.clone(),
        )
        .unwrap();

        assert_eq!(endpoint.last_options(), Some(options));
    }

    #[test]
    fn test_report_annotates_state() {
        let endpoint = RecordingEndpoint::new();
        let connection = endpoint.connection();

        fn fixed_trace() -> String {
            "at dispatch site".to_string()
        }

        let bridge = setup(
            &json!({"value": 0}),
            Some(endpoint as Arc<dyn InspectorEndpoint>),
            fixed_trace,
            ConnectOptions::default(),
        )
        .unwrap();
        connection.drain_calls();

        #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(tag = "type", rename_all = "camelCase")]
        enum TestAction {
            IncrementOne,
        }
        impl Action for TestAction {
            fn name(&self) -> &'static str {
                "IncrementOne"
            }
        }

        bridge.report(&TestAction::IncrementOne, &json!({"value": 1}));

        assert_eq!(
            connection.calls(),
            vec![ConnectionCall::Send {
                action: Some(json!({"type": "incrementOne"})),
                state: json!({
                    "value": 1,
                    "_meta": {"stackTrace": "at dispatch site"}
                }),
            }]
        );
    }
}
