//! Centralized state store with reducer pattern and inspector mirroring

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::devtools::connector::{self, Bridge, ConnectOptions, InspectorEndpoint};
use crate::devtools::protocol::InspectorMessage;
use crate::devtools::trace::{self, TraceCapture};
use crate::error::{StateError, UnknownActionError};
use crate::Action;

/// Blanket trait for state values the store can hold.
///
/// The bounds are what the inspector wire demands: state snapshots are
/// serialized outbound on every report and decoded inbound on every
/// time-travel command, and the setup-time baseline is kept as a clone.
pub trait StoreState: Clone + Serialize + DeserializeOwned + Send + 'static {}

impl<T> StoreState for T where T: Clone + Serialize + DeserializeOwned + Send + 'static {}

/// A reducer function that computes the next state for an action
///
/// Pure: no side effects, and the current state is only read. Returns the
/// next state, or [`UnknownActionError`] for an action it does not
/// recognize, in which case the store is left untouched.
pub type Reducer<S, A> = fn(&S, A) -> Result<S, UnknownActionError>;

/// Identifies a subscriber registration for removal.
///
/// Keys are never reused within a store, so removing one registration can
/// never affect another, and re-subscribing after an unsubscribe yields a
/// distinct registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberKey(u64);

type Subscriber = Box<dyn FnMut() + Send>;

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the application state and provides a single point for
/// state mutations through [`dispatch`](Store::dispatch). Every accepted
/// mutation is mirrored to an external time-travel inspector when one was
/// detected at construction; without one the store runs in plain
/// pass-through mode.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
///
/// # Example
/// ```ignore
/// #[derive(Clone, Default, Serialize, Deserialize)]
/// struct AppState {
///     value: i64,
/// }
///
/// #[derive(Action, Clone, Debug, Serialize, Deserialize)]
/// #[serde(tag = "type", rename_all = "camelCase")]
/// enum AppAction {
///     IncrementOne,
/// }
///
/// fn reducer(state: &AppState, action: AppAction) -> Result<AppState, UnknownActionError> {
///     match action {
///         AppAction::IncrementOne => Ok(AppState { value: state.value + 1 }),
///     }
/// }
///
/// let mut store = Store::new(AppState::default(), reducer);
/// store.dispatch(AppAction::IncrementOne)?;
/// assert_eq!(store.state().value, 1);
/// ```
pub struct Store<S, A: Action> {
    state: S,
    version: u64,
    reducer: Reducer<S, A>,
    subscribers: Vec<(SubscriberKey, Subscriber)>,
    next_subscriber: u64,
    pub(crate) bridge: Option<Bridge<S>>,
}

impl<S: StoreState, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    ///
    /// The inspector endpoint is resolved from the global registry
    /// ([`crate::devtools::install_endpoint`]); when none is installed the
    /// store runs un-bridged. Use [`Store::builder`] to inject an endpoint
    /// explicitly or to customize the bridge.
    pub fn new(initial: S, reducer: Reducer<S, A>) -> Self {
        Self::builder(initial, reducer).build()
    }

    /// Start building a store, customizing how the bridge is established
    pub fn builder(initial: S, reducer: Reducer<S, A>) -> StoreBuilder<S, A> {
        StoreBuilder {
            initial,
            reducer,
            endpoint: None,
            trace_capture: trace::capture_stack_trace,
            instance_name: None,
        }
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Version counter, bumped exactly once per accepted state replacement
    ///
    /// Rust values have no stable identity to compare, so consumers that
    /// want cheap change detection compare versions between notifications.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether an inspector connection was established at construction
    pub fn is_bridged(&self) -> bool {
        self.bridge.is_some()
    }

    /// Dispatch an action to the store
    ///
    /// Computes the next state via the reducer. On success the state is
    /// replaced, the transition is reported to the inspector (when bridged),
    /// and every subscriber is invoked before this method returns. A reducer
    /// rejection propagates to the caller and leaves the store untouched.
    pub fn dispatch(&mut self, action: A) -> Result<(), UnknownActionError> {
        let next = (self.reducer)(&self.state, action.clone())?;
        self.state = next;
        self.version = self.version.wrapping_add(1);
        if let Some(bridge) = &self.bridge {
            bridge.report(&action, &self.state);
        }
        self.notify();
        Ok(())
    }

    /// Replace parts of the state without going through the reducer
    ///
    /// Shallow-merges the top-level keys of `partial` into the current
    /// state's JSON form and decodes the merged document back into `S`
    /// (unknown keys, such as inspector annotations, are dropped by serde).
    /// When either side is not a JSON object, `partial` replaces the state
    /// wholesale. Subscribers are notified exactly once.
    ///
    /// This is the externally-driven replacement path used by time-travel
    /// commands; application logic should use [`dispatch`](Store::dispatch).
    pub fn set_state(&mut self, partial: Value) -> Result<(), StateError> {
        let current = serde_json::to_value(&self.state).map_err(StateError::Encode)?;
        let merged = match (current, partial) {
            (Value::Object(mut base), Value::Object(update)) => {
                for (key, value) in update {
                    base.insert(key, value);
                }
                Value::Object(base)
            }
            (_, replacement) => replacement,
        };
        let next = serde_json::from_value(merged).map_err(StateError::Decode)?;
        self.replace_state(next);
        Ok(())
    }

    /// Register a subscriber invoked after every state replacement
    ///
    /// Subscribers run synchronously, in registration order, after the new
    /// state is written. The returned key removes exactly this registration.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriberKey
    where
        F: FnMut() + Send + 'static,
    {
        let key = SubscriberKey(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((key, Box::new(subscriber)));
        key
    }

    /// Remove a subscriber registration
    ///
    /// Returns `true` if the key was registered. Unknown or already-removed
    /// keys are a no-op.
    pub fn unsubscribe(&mut self, key: SubscriberKey) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(k, _)| *k != key);
        self.subscribers.len() != before
    }

    /// Take the inbound inspector message stream
    ///
    /// Yields the receiver the connection handed over at bridge setup; the
    /// host loop drains it and applies each message via
    /// [`handle_inspector_message`](Store::handle_inspector_message). Returns
    /// `None` when the store is un-bridged, when the connection provided no
    /// stream, or when the stream was already taken.
    pub fn inspector_messages(&mut self) -> Option<mpsc::UnboundedReceiver<InspectorMessage>> {
        self.bridge.as_mut()?.inbound.take()
    }

    /// Replace the whole state and notify subscribers.
    pub(crate) fn replace_state(&mut self, next: S) {
        self.state = next;
        self.version = self.version.wrapping_add(1);
        self.notify();
    }

    fn notify(&mut self) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber();
        }
    }
}

/// Builder for [`Store`], controlling how the inspector bridge is set up
///
/// Obtained from [`Store::builder`]. `build()` resolves the endpoint once:
/// an explicitly injected endpoint wins, otherwise the global registry is
/// consulted, otherwise the store runs un-bridged (logged as a warning, not
/// an error).
pub struct StoreBuilder<S, A: Action> {
    initial: S,
    reducer: Reducer<S, A>,
    endpoint: Option<Arc<dyn InspectorEndpoint>>,
    trace_capture: TraceCapture,
    instance_name: Option<String>,
}

impl<S: StoreState, A: Action> StoreBuilder<S, A> {
    /// Connect through this endpoint instead of consulting the registry
    pub fn endpoint(mut self, endpoint: Arc<dyn InspectorEndpoint>) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Override the diagnostic stack-trace capture used in action reports
    ///
    /// Defaults to [`trace::capture_stack_trace`]. Use [`trace::no_trace`]
    /// to suppress capture entirely.
    pub fn trace_capture(mut self, capture: TraceCapture) -> Self {
        self.trace_capture = capture;
        self
    }

    /// Label this store instance in the inspector UI
    pub fn instance_name(mut self, name: impl Into<String>) -> Self {
        self.instance_name = Some(name.into());
        self
    }

    /// Build the store, establishing the bridge if an endpoint is available
    pub fn build(self) -> Store<S, A> {
        let endpoint = self.endpoint.or_else(crate::devtools::installed_endpoint);
        let options = ConnectOptions {
            name: self.instance_name,
        };
        let bridge = connector::setup(&self.initial, endpoint, self.trace_capture, options);
        Store {
            state: self.initial,
            version: 0,
            reducer: self.reducer,
            subscribers: Vec::new(),
            next_subscriber: 0,
            bridge,
        }
    }
}
