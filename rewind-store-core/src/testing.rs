//! Test utilities for bridged stores
//!
//! Provides in-process stand-ins for the inspector so store/bridge behavior
//! can be asserted without a real inspector process:
//!
//! - [`RecordingConnection`]: logs every outbound `init`/`send` call and
//!   lets a test push inbound messages as if the inspector had sent them
//! - [`RecordingEndpoint`]: hands the recording connection to a store under
//!   construction
//!
//! # Example
//!
//! ```ignore
//! use rewind_store::testing::{ConnectionCall, RecordingEndpoint};
//!
//! let endpoint = RecordingEndpoint::new();
//! let connection = endpoint.connection();
//!
//! let mut store = Store::builder(AppState::default(), reducer)
//!     .endpoint(endpoint)
//!     .build();
//!
//! store.dispatch(AppAction::IncrementOne)?;
//! assert_eq!(connection.send_count(), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::devtools::connector::{ConnectOptions, InspectorConnection, InspectorEndpoint};
use crate::devtools::protocol::InspectorMessage;

/// One outbound call observed by a [`RecordingConnection`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionCall {
    /// `init(state)`: a baseline was (re)established
    Init(Value),
    /// `send(action, state)`: a transition report or a lifted-state echo
    Send {
        action: Option<Value>,
        state: Value,
    },
}

/// In-process stand-in for an inspector connection
pub struct RecordingConnection {
    calls: Mutex<Vec<ConnectionCall>>,
    inbound_tx: mpsc::UnboundedSender<InspectorMessage>,
    inbound_rx: Mutex<Option<mpsc::UnboundedReceiver<InspectorMessage>>>,
}

impl RecordingConnection {
    pub fn new() -> Arc<Self> {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            inbound_tx,
            inbound_rx: Mutex::new(Some(inbound_rx)),
        })
    }

    /// Simulate the inspector pushing a message to the application
    pub fn push(&self, message: InspectorMessage) {
        let _ = self.inbound_tx.send(message);
    }

    /// Snapshot of all outbound calls so far
    pub fn calls(&self) -> Vec<ConnectionCall> {
        self.calls.lock().clone()
    }

    /// Remove and return the recorded outbound calls
    pub fn drain_calls(&self) -> Vec<ConnectionCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    /// Number of `init` calls observed
    pub fn init_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ConnectionCall::Init(_)))
            .count()
    }

    /// Number of `send` calls observed
    pub fn send_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ConnectionCall::Send { .. }))
            .count()
    }

    /// The most recently established baseline, if any
    pub fn last_baseline(&self) -> Option<Value> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            ConnectionCall::Init(state) => Some(state.clone()),
            ConnectionCall::Send { .. } => None,
        })
    }
}

impl InspectorConnection for RecordingConnection {
    fn init(&self, state: Value) {
        self.calls.lock().push(ConnectionCall::Init(state));
    }

    fn send(&self, action: Option<Value>, state: Value) {
        self.calls.lock().push(ConnectionCall::Send { action, state });
    }

    fn subscribe(&self) -> Option<mpsc::UnboundedReceiver<InspectorMessage>> {
        self.inbound_rx.lock().take()
    }
}

/// Endpoint handing out a single shared [`RecordingConnection`]
pub struct RecordingEndpoint {
    connection: Arc<RecordingConnection>,
    last_options: Mutex<Option<ConnectOptions>>,
}

impl RecordingEndpoint {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            connection: RecordingConnection::new(),
            last_options: Mutex::new(None),
        })
    }

    /// The connection every `connect` call hands out
    pub fn connection(&self) -> Arc<RecordingConnection> {
        self.connection.clone()
    }

    /// Options received by the most recent `connect` call
    pub fn last_options(&self) -> Option<ConnectOptions> {
        self.last_options.lock().clone()
    }
}

impl InspectorEndpoint for RecordingEndpoint {
    fn connect(&self, options: ConnectOptions) -> Arc<dyn InspectorConnection> {
        *self.last_options.lock() = Some(options);
        self.connection.clone()
    }
}
