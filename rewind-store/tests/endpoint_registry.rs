//! Global endpoint registry behavior
//!
//! Lives in its own test binary: the registry is process-global state, and
//! keeping all of its assertions in one test avoids cross-test interference.

use rewind_store::prelude::*;
use rewind_store::testing::RecordingEndpoint;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct CounterState {
    value: i64,
}

#[derive(Action, Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum CounterAction {
    IncrementOne,
}

fn reducer(state: &CounterState, action: CounterAction) -> Result<CounterState, UnknownActionError> {
    match action {
        CounterAction::IncrementOne => Ok(CounterState {
            value: state.value + 1,
        }),
    }
}

#[test]
fn test_registry_lifecycle() {
    assert!(installed_endpoint().is_none());

    // Installed endpoint is picked up by Store::new.
    let installed = RecordingEndpoint::new();
    install_endpoint(installed.clone());
    assert!(installed_endpoint().is_some());

    let store: Store<CounterState, CounterAction> =
        Store::new(CounterState::default(), reducer);
    assert!(store.is_bridged());
    assert_eq!(installed.connection().init_count(), 1);

    // A builder-injected endpoint wins over the registry.
    let injected = RecordingEndpoint::new();
    let store = Store::builder(CounterState::default(), reducer)
        .endpoint(injected.clone())
        .build();
    assert!(store.is_bridged());
    assert_eq!(injected.connection().init_count(), 1);
    assert_eq!(installed.connection().init_count(), 1);

    // After clearing, new stores run un-bridged.
    clear_endpoint();
    assert!(installed_endpoint().is_none());

    let store: Store<CounterState, CounterAction> =
        Store::new(CounterState::default(), reducer);
    assert!(!store.is_bridged());
}
