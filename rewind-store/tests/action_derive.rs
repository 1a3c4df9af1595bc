//! Tests for #[derive(Action)] macro

use rewind_store::Action;
use serde::{Deserialize, Serialize};

#[test]
fn test_unit_variants() {
    #[derive(Action, Clone, Debug, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    enum CounterAction {
        IncrementOne,
        DecrementOne,
    }

    assert_eq!(CounterAction::IncrementOne.name(), "IncrementOne");
    assert_eq!(CounterAction::DecrementOne.name(), "DecrementOne");
}

#[test]
fn test_struct_variants() {
    #[derive(Action, Clone, Debug, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    enum FormAction {
        SetLabel { label: String },
        Clear,
    }

    let action = FormAction::SetLabel {
        label: "count".into(),
    };
    assert_eq!(action.name(), "SetLabel");
    assert_eq!(FormAction::Clear.name(), "Clear");
}

#[test]
fn test_tuple_variants() {
    // Externally tagged so the tuple payload has a wire form.
    #[derive(Action, Clone, Debug, Serialize, Deserialize)]
    enum PayloadAction {
        Set(i64),
        Clear,
    }

    assert_eq!(PayloadAction::Set(3).name(), "Set");
    assert_eq!(PayloadAction::Clear.name(), "Clear");
}

#[test]
fn test_wire_round_trip() {
    #[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    enum CounterAction {
        IncrementOne,
        SetValue { value: i64 },
    }

    let encoded = serde_json::to_string(&CounterAction::IncrementOne).unwrap();
    assert_eq!(encoded, r#"{"type":"incrementOne"}"#);

    let decoded: CounterAction =
        serde_json::from_str(r#"{"type":"setValue","value":7}"#).unwrap();
    assert_eq!(decoded, CounterAction::SetValue { value: 7 });
    assert_eq!(decoded.name(), "SetValue");
}
