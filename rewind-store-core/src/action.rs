//! Action trait for type-safe state mutations

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or re-dispatched by the inspector
/// - Debug: For debugging and logging
/// - Send + 'static: For async dispatch across threads
/// - Serialize + DeserializeOwned: Every action crosses the inspector wire
///   as JSON text, both outbound (action reports) and inbound (re-dispatch)
///
/// Use `#[derive(Action)]` from `rewind-store-macros` to auto-implement this
/// trait; pair it with a `#[serde(tag = "type")]` enum so the wire form is a
/// tagged object.
pub trait Action: Clone + Debug + Send + Serialize + DeserializeOwned + 'static {
    /// Get the action name for logging and error reporting
    fn name(&self) -> &'static str;
}
