//! Counter - Minimal rewind-store example
//!
//! This example demonstrates the core pattern plus the inspector bridge:
//! - State: What the app knows
//! - Actions: What can happen
//! - Reducer: How state changes
//! - Store: Where state lives
//! - Loopback inspector: an in-process endpoint standing in for a real
//!   transport adapter, so the whole protocol round trip is visible
//!
//! Run with `RUST_LOG=info` to see the traffic on both sides.

use std::sync::Arc;

use parking_lot::Mutex;
use rewind_store::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// State - What the app knows
// ============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct CounterState {
    value: i64,
}

// ============================================================================
// Actions - What can happen
// ============================================================================

#[derive(Action, Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum CounterAction {
    IncrementOne,
}

// ============================================================================
// Reducer - How state changes (pure function, returns the next state)
// ============================================================================

fn reducer(state: &CounterState, action: CounterAction) -> Result<CounterState, UnknownActionError> {
    match action {
        CounterAction::IncrementOne => Ok(CounterState {
            value: state.value + 1,
        }),
    }
}

// ============================================================================
// Loopback inspector - logs outbound traffic, lets main inject commands
// ============================================================================

struct LoopbackConnection {
    inbound_tx: mpsc::UnboundedSender<InspectorMessage>,
    inbound_rx: Mutex<Option<mpsc::UnboundedReceiver<InspectorMessage>>>,
}

impl LoopbackConnection {
    /// Push a command as if the inspector had sent it.
    fn push(&self, message: InspectorMessage) {
        let _ = self.inbound_tx.send(message);
    }
}

impl InspectorConnection for LoopbackConnection {
    fn init(&self, state: Value) {
        info!(%state, "inspector: baseline established");
    }

    fn send(&self, action: Option<Value>, state: Value) {
        match action {
            Some(action) => info!(%action, %state, "inspector: transition reported"),
            None => info!(lifted = %state, "inspector: lifted state echoed"),
        }
    }

    fn subscribe(&self) -> Option<mpsc::UnboundedReceiver<InspectorMessage>> {
        self.inbound_rx.lock().take()
    }
}

struct LoopbackEndpoint {
    connection: Arc<LoopbackConnection>,
}

impl LoopbackEndpoint {
    /// The endpoint plus a handle for pushing commands "from the inspector".
    fn new() -> (Arc<Self>, Arc<LoopbackConnection>) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let connection = Arc::new(LoopbackConnection {
            inbound_tx,
            inbound_rx: Mutex::new(Some(inbound_rx)),
        });
        let endpoint = Arc::new(Self {
            connection: connection.clone(),
        });
        (endpoint, connection)
    }
}

impl InspectorEndpoint for LoopbackEndpoint {
    fn connect(&self, options: ConnectOptions) -> Arc<dyn InspectorConnection> {
        info!(name = ?options.name, "inspector: connection opened");
        self.connection.clone()
    }
}

// ============================================================================
// Main - Wire the store to the loopback inspector and time-travel it
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (endpoint, inspector) = LoopbackEndpoint::new();
    install_endpoint(endpoint);

    let mut store = Store::builder(CounterState::default(), reducer)
        .instance_name("counter-demo")
        .build();

    store.subscribe(|| info!("app: subscribers notified"));

    let Some(mut inbound) = store.inspector_messages() else {
        return Err("store was built un-bridged".into());
    };

    // Normal application flow: three increments, each mirrored outbound.
    for _ in 0..3 {
        store.dispatch(CounterAction::IncrementOne)?;
    }
    info!(value = store.state().value, "app: after dispatching");

    // The "inspector" injects an action of its own ...
    inspector.push(InspectorMessage::Action {
        payload: json!({"type": "incrementOne"}).to_string(),
    });

    // ... rolls the store back to an earlier snapshot ...
    inspector.push(InspectorMessage::Dispatch {
        payload: MonitorCommand::Rollback,
        state: Some(json!({"value": 1}).to_string()),
    });

    // ... then resets it to the setup-time baseline.
    inspector.push(InspectorMessage::Dispatch {
        payload: MonitorCommand::Reset,
        state: None,
    });

    // Host loop: apply each inbound command to completion.
    while let Ok(message) = inbound.try_recv() {
        store.handle_inspector_message(message);
        info!(value = store.state().value, "app: after inspector command");
    }

    info!(value = store.state().value, "app: final state");
    Ok(())
}
