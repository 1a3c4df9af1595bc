//! Bridge to an external time-travel inspector
//!
//! The bridge mirrors every accepted dispatch to an inspector process and
//! replays the inspector's timeline commands back into the store. It is
//! strictly optional: a store built while no endpoint is available runs
//! un-bridged, and every reporting path is then a complete no-op.
//!
//! # Pieces
//!
//! - [`connector`]: endpoint discovery (global registry or builder
//!   injection), the [`InspectorEndpoint`]/[`InspectorConnection`] traits a
//!   host transport adapter implements, and bridge setup
//! - [`protocol`]: serde model of the inbound wire envelope, the `_meta`
//!   diagnostic annotation, and the lifted-state helpers
//! - [`trace`]: injectable dispatch-site stack capture for action reports
//! - the inbound interpreter, surfaced as
//!   [`Store::handle_inspector_message`](crate::Store::handle_inspector_message)
//!
//! # Wiring a host loop
//!
//! ```ignore
//! let mut store = Store::builder(AppState::default(), reducer)
//!     .endpoint(my_transport_endpoint)
//!     .build();
//!
//! let mut inbound = store.inspector_messages().expect("bridged");
//! tokio::spawn(async move {
//!     while let Some(message) = inbound.recv().await {
//!         store.handle_inspector_message(message);
//!     }
//! });
//! ```

pub mod connector;
mod interpreter;
pub mod protocol;
pub mod trace;

pub use connector::{
    clear_endpoint, install_endpoint, installed_endpoint, ConnectOptions, InspectorConnection,
    InspectorEndpoint,
};
pub use protocol::{InspectorMessage, MonitorCommand};
pub use trace::{capture_stack_trace, no_trace, TraceCapture};
