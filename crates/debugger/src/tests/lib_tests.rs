use super::*;

use serde_json::{json, Map, Value};
use shared::console::{EntityType, SourceEntity};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object")
}

fn widget_source(id: &str, name: &str) -> SourceEntity {
    SourceEntity::new(EntityType::Widget, id, name)
}

fn validation_error(id: &str, property_path: &str, state: Value) -> Message {
    Message::error(format!("{property_path} is invalid"))
        .with_log_type(LogType::WidgetPropertyValidationError)
        .with_source(widget_source(id, "Input1").with_property_path(property_path))
        .with_state(object(state))
}

fn eval_error(id: &str, state: Value) -> Message {
    Message::error("evaluation failed")
        .with_log_type(LogType::EvalError)
        .with_source(widget_source(id, "Input1"))
        .with_state(object(state))
}

#[test]
fn error_logs_increment_the_counter_once() {
    let state = DebuggerState::default()
        .reduce(DebuggerEvent::Log(Message::error("boom")))
        .reduce(DebuggerEvent::Log(Message::warning("careful")))
        .reduce(DebuggerEvent::Log(Message::info("fyi")));

    assert_eq!(state.logs.len(), 3);
    assert_eq!(state.error_count, 1);
}

#[test]
fn clear_logs_resets_logs_and_counter_only() {
    let state = DebuggerState::default()
        .reduce(DebuggerEvent::ShowDebugger(true))
        .reduce(DebuggerEvent::Log(Message::error("boom")))
        .reduce(DebuggerEvent::ErrorLog(eval_error("w1", json!({"text": 1}))))
        .reduce(DebuggerEvent::ClearLogs);

    assert!(state.logs.is_empty());
    assert_eq!(state.error_count, 0);
    assert!(state.is_open);
    assert!(state.errors.contains_key("w1"));
}

#[test]
fn counter_restarts_after_clear() {
    let state = DebuggerState::replay([
        DebuggerEvent::Log(Message::error("one")),
        DebuggerEvent::Log(Message::error("two")),
        DebuggerEvent::ClearLogs,
        DebuggerEvent::Log(Message::error("three")),
    ]);

    assert_eq!(state.error_count, 1);
    assert_eq!(state.logs.len(), 1);
}

#[test]
fn show_debugger_sets_visibility() {
    let state = DebuggerState::default().reduce(DebuggerEvent::ShowDebugger(true));
    assert!(state.is_open);
    let state = state.reduce(DebuggerEvent::ShowDebugger(false));
    assert!(!state.is_open);
}

#[test]
fn validation_errors_are_keyed_per_property() {
    assert_eq!(
        error_key(&validation_error("w1", "text", json!({}))).as_deref(),
        Some("w1-text")
    );
    assert_eq!(error_key(&eval_error("w1", json!({}))).as_deref(), Some("w1"));

    let with_path_but_other_kind = Message::error("eval")
        .with_log_type(LogType::EvalError)
        .with_source(widget_source("w1", "Input1").with_property_path("text"));
    assert_eq!(error_key(&with_path_but_other_kind).as_deref(), Some("w1"));
}

#[test]
fn messages_without_source_have_no_key() {
    assert_eq!(error_key(&Message::error("orphan")), None);

    let state = DebuggerState::default().reduce(DebuggerEvent::ErrorLog(Message::error("orphan")));
    assert!(state.errors.is_empty());
}

#[test]
fn error_log_merges_into_existing_record() {
    let mut first = eval_error("w1", json!({"text": "abc"}));
    first.extra.insert("a".into(), json!(1));
    let mut second = eval_error("w1", json!({"isValid": false}));
    second.extra.insert("b".into(), json!(2));

    let state = DebuggerState::default()
        .reduce(DebuggerEvent::ErrorLog(first))
        .reduce(DebuggerEvent::ErrorLog(second));

    let record = state.errors.get("w1").expect("record");
    assert_eq!(record.extra.get("a"), Some(&json!(1)));
    assert_eq!(record.extra.get("b"), Some(&json!(2)));
    assert_eq!(
        record.state.clone().map(Value::Object),
        Some(json!({"text": "abc", "isValid": false}))
    );
}

#[test]
fn errors_for_different_properties_are_independent() {
    let state = DebuggerState::default()
        .reduce(DebuggerEvent::ErrorLog(validation_error("w1", "text", json!({"text": 1}))))
        .reduce(DebuggerEvent::ErrorLog(validation_error("w1", "label", json!({"label": 2}))))
        .reduce(DebuggerEvent::UpdateErrorLog(validation_error("w1", "text", json!({}))));

    assert!(!state.errors.contains_key("w1-text"));
    assert!(state.errors.contains_key("w1-label"));
}

#[test]
fn update_with_empty_state_clears_the_error() {
    let state = DebuggerState::default()
        .reduce(DebuggerEvent::ErrorLog(eval_error("w1", json!({"text": 1}))))
        .reduce(DebuggerEvent::UpdateErrorLog(eval_error("w1", json!({}))));

    assert!(state.errors.is_empty());
}

#[test]
fn update_with_missing_state_clears_the_error() {
    let mut update = eval_error("w1", json!({}));
    update.state = None;
    let state = DebuggerState::default()
        .reduce(DebuggerEvent::ErrorLog(eval_error("w1", json!({"text": 1}))))
        .reduce(DebuggerEvent::UpdateErrorLog(update));

    assert!(state.errors.is_empty());
}

#[test]
fn update_with_state_replaces_record_wholesale() {
    let mut reported = validation_error("w1", "text", json!({"text": "abc", "extra": true}));
    reported.extra.insert("a".into(), json!(1));
    let replacement = validation_error("w1", "text", json!({"text": "abcd"}));

    let state = DebuggerState::default()
        .reduce(DebuggerEvent::ErrorLog(reported))
        .reduce(DebuggerEvent::UpdateErrorLog(replacement.clone()));

    assert_eq!(state.errors.len(), 1);
    let record = state.errors.get("w1-text").expect("record under composite key");
    assert_eq!(record, &replacement);
    assert!(record.extra.get("a").is_none());
}

#[test]
fn update_for_absent_key_with_state_creates_it() {
    let state = DebuggerState::default()
        .reduce(DebuggerEvent::UpdateErrorLog(eval_error("w2", json!({"x": 1}))));
    assert!(state.errors.contains_key("w2"));

    let state = state.reduce(DebuggerEvent::UpdateErrorLog(eval_error("w3", json!({}))));
    assert_eq!(state.errors.len(), 1);
}

#[test]
fn errors_for_entity_collects_property_records() {
    let state = DebuggerState::replay([
        DebuggerEvent::ErrorLog(validation_error("w1", "text", json!({"text": 1}))),
        DebuggerEvent::ErrorLog(validation_error("w1", "label", json!({"label": 1}))),
        DebuggerEvent::ErrorLog(eval_error("w2", json!({"x": 1}))),
    ]);

    let keys: Vec<&str> = state.errors_for_entity("w1").map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["w1-label", "w1-text"]);
}

#[test]
fn filters_logs_by_severity_and_search() {
    let state = DebuggerState::replay([
        DebuggerEvent::Log(Message::error("Query failed").with_source(SourceEntity::new(
            EntityType::Action,
            "a1",
            "getUsers",
        ))),
        DebuggerEvent::Log(Message::info("Widget updated").with_source(widget_source("w1", "Input1"))),
        DebuggerEvent::Log(Message::warning("Slow query")),
    ]);

    let errors = LogFilter {
        severity: Some(Severity::Error),
        search: None,
    };
    assert_eq!(state.filtered_logs(&errors).count(), 1);

    let by_name = LogFilter {
        severity: None,
        search: Some("GETUSERS".into()),
    };
    let texts: Vec<&str> = state.filtered_logs(&by_name).map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["Query failed"]);

    let by_text = LogFilter {
        severity: None,
        search: Some("query".into()),
    };
    assert_eq!(state.filtered_logs(&by_text).count(), 2);

    assert_eq!(state.filtered_logs(&LogFilter::default()).count(), 3);
}

#[test]
fn events_parse_from_host_json() {
    let raw = json!([
        {"type": "SHOW_DEBUGGER", "payload": true},
        {"type": "DEBUGGER_LOG", "payload": {"severity": "error", "text": "boom"}},
        {"type": "CLEAR_DEBUGGER_LOGS"},
        {"type": "DEBUGGER_ERROR_LOG", "payload": {
            "severity": "error",
            "text": "bad value",
            "logType": "WIDGET_PROPERTY_VALIDATION_ERROR",
            "source": {"type": "WIDGET", "id": "w1", "name": "Input1", "propertyPath": "text"},
            "state": {"text": "x"}
        }}
    ]);
    let events: Vec<DebuggerEvent> = serde_json::from_value(raw).expect("parse events");
    let state = DebuggerState::replay(events);

    assert!(state.is_open);
    assert_eq!(state.error_count, 0);
    assert!(state.errors.contains_key("w1-text"));
}
