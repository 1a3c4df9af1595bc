//! Core traits and types for rewind-store
//!
//! This crate provides a small publish-subscribe state container whose
//! mutations can be mirrored to, and replayed from, an external time-travel
//! inspector process.
//!
//! # Core Concepts
//!
//! - **Action**: Serializable events that describe state changes
//! - **Store**: Centralized state container with reducer pattern
//! - **Bridge**: Optional connection to an out-of-process inspector,
//!   established once at store construction
//! - **Interpreter**: Applies the inspector's timeline commands (reset,
//!   commit, rollback, jumps, import) back onto the store
//!
//! # Basic Example
//!
//! ```ignore
//! use rewind_store_core::prelude::*;
//!
//! #[derive(Clone, Debug, Default, Serialize, Deserialize)]
//! struct AppState {
//!     value: i64,
//! }
//!
//! #[derive(Action, Clone, Debug, Serialize, Deserialize)]
//! #[serde(tag = "type", rename_all = "camelCase")]
//! enum AppAction {
//!     IncrementOne,
//! }
//!
//! fn reducer(state: &AppState, action: AppAction) -> Result<AppState, UnknownActionError> {
//!     match action {
//!         AppAction::IncrementOne => Ok(AppState { value: state.value + 1 }),
//!     }
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.dispatch(AppAction::IncrementOne)?;
//! assert_eq!(store.state().value, 1);
//! ```
//!
//! # Bridged Mode
//!
//! When the host environment installs an inspector endpoint
//! ([`devtools::install_endpoint`]) before the store is built, every
//! accepted dispatch is reported over the connection together with a state
//! snapshot, and the inspector can drive the store through its timeline:
//!
//! ```ignore
//! devtools::install_endpoint(my_transport_endpoint);
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! let mut inbound = store.inspector_messages().expect("bridged");
//!
//! loop {
//!     tokio::select! {
//!         Some(message) = inbound.recv() => store.handle_inspector_message(message),
//!         // ... application events dispatch as usual
//!     }
//! }
//! ```
//!
//! Without an endpoint the same code runs un-bridged: dispatch, subscriber
//! notification, and state access behave identically, and nothing is
//! reported anywhere.

pub mod action;
pub mod devtools;
pub mod error;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;

// Error exports
pub use error::{StateError, UnknownActionError};

// Store exports
pub use store::{Reducer, Store, StoreBuilder, StoreState, SubscriberKey};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::devtools::{
        clear_endpoint, install_endpoint, installed_endpoint, ConnectOptions, InspectorConnection,
        InspectorEndpoint, InspectorMessage, MonitorCommand, TraceCapture,
    };
    pub use crate::error::{StateError, UnknownActionError};
    pub use crate::store::{Reducer, Store, StoreBuilder, StoreState, SubscriberKey};
}
