//! rewind-store: Time-travel-debuggable state container
//!
//! A small publish-subscribe store in the Redux mold: all state mutations
//! happen through dispatched actions, and every accepted mutation can be
//! mirrored to an external time-travel inspector that resets, rolls back,
//! jumps, and imports state over a host-provided connection.
//!
//! # Example
//! ```ignore
//! use rewind_store::prelude::*;
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
//! ```

// Re-export everything from core
pub use rewind_store_core::*;

// Re-export derive macros
pub use rewind_store_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use rewind_store_core::{Action, StoreState};

    // Store
    pub use rewind_store_core::{Reducer, Store, StoreBuilder, SubscriberKey};

    // Errors
    pub use rewind_store_core::{StateError, UnknownActionError};

    // Inspector bridge
    pub use rewind_store_core::devtools::{
        clear_endpoint, install_endpoint, installed_endpoint, ConnectOptions, InspectorConnection,
        InspectorEndpoint, InspectorMessage, MonitorCommand, TraceCapture,
    };

    // Derive macros
    pub use rewind_store_macros::Action;
}
