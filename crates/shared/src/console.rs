//! Debugger console records.
//!
//! Every entry the evaluator or the dispatch layer reports to the debugger is
//! a [`Message`]. The same type is used for the append-only log and for the
//! per-entity error records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogType {
    WidgetUpdate,
    ActionUpdate,
    EvalError,
    EvalWarning,
    ActionExecutionError,
    ActionExecutionSuccess,
    EntityDeleted,
    WidgetPropertyValidationError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Action,
    Datasource,
    Widget,
}

/// The entity a log entry is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEntity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_path: Option<String>,
}

impl SourceEntity {
    pub fn new(entity_type: EntityType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
            name: name.into(),
            property_path: None,
        }
    }

    pub fn with_property_path(mut self, property_path: impl Into<String>) -> Self {
        self.property_path = Some(property_path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub severity: Severity,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_type: Option<LogType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceEntity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Value>,
    /// Entity state at the time of the report. An empty or missing state on
    /// an update means the error went away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            timestamp: Some(Utc::now()),
            id: None,
            log_type: None,
            source: None,
            messages: Vec::new(),
            state: None,
            time_taken: None,
            extra: Map::new(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    pub fn with_log_type(mut self, log_type: LogType) -> Self {
        self.log_type = Some(log_type);
        self
    }

    pub fn with_source(mut self, source: SourceEntity) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_state(mut self, state: Map<String, Value>) -> Self {
        self.state = Some(state);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn has_state(&self) -> bool {
        self.state.as_ref().is_some_and(|state| !state.is_empty())
    }
}
