//! Debugger panel state: the append-only console log and the keyed map of
//! current per-entity errors.
//!
//! State is a plain value. [`DebuggerState::reduce`] consumes the current
//! state and one event and returns the next state; the host decides where
//! the value lives and in what order events arrive.

pub mod merge;

use std::collections::{btree_map::Entry, BTreeMap};

use serde::{Deserialize, Serialize};
use shared::console::{LogType, Message, Severity};
use tracing::{debug, warn};

use crate::merge::merge_message;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DebuggerEvent {
    #[serde(rename = "DEBUGGER_LOG")]
    Log(Message),
    #[serde(rename = "CLEAR_DEBUGGER_LOGS")]
    ClearLogs,
    #[serde(rename = "SHOW_DEBUGGER")]
    ShowDebugger(bool),
    #[serde(rename = "DEBUGGER_ERROR_LOG")]
    ErrorLog(Message),
    #[serde(rename = "DEBUGGER_UPDATE_ERROR_LOG")]
    UpdateErrorLog(Message),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebuggerState {
    pub logs: Vec<Message>,
    pub error_count: usize,
    pub is_open: bool,
    pub errors: BTreeMap<String, Message>,
}

/// Property validation errors are tracked per property, everything else per
/// entity. Returns `None` when the message has no source to key by.
pub fn error_key(message: &Message) -> Option<String> {
    let source = message.source.as_ref()?;
    match (message.log_type, source.property_path.as_deref()) {
        (Some(LogType::WidgetPropertyValidationError), Some(property_path)) => {
            Some(format!("{}-{}", source.id, property_path))
        }
        _ => Some(source.id.clone()),
    }
}

impl DebuggerState {
    pub fn reduce(mut self, event: DebuggerEvent) -> Self {
        match event {
            DebuggerEvent::Log(message) => {
                if message.is_error() {
                    self.error_count += 1;
                }
                self.logs.push(message);
            }
            DebuggerEvent::ClearLogs => {
                self.logs.clear();
                self.error_count = 0;
            }
            DebuggerEvent::ShowDebugger(is_open) => {
                self.is_open = is_open;
            }
            DebuggerEvent::ErrorLog(message) => {
                let Some(key) = error_key(&message) else {
                    warn!(text = %message.text, "error log without a source entity ignored");
                    return self;
                };
                match self.errors.entry(key) {
                    Entry::Occupied(mut record) => merge_message(record.get_mut(), message),
                    Entry::Vacant(record) => {
                        record.insert(message);
                    }
                }
            }
            DebuggerEvent::UpdateErrorLog(message) => {
                let Some(key) = error_key(&message) else {
                    warn!(text = %message.text, "error update without a source entity ignored");
                    return self;
                };
                if message.has_state() {
                    self.errors.insert(key, message);
                } else if self.errors.remove(&key).is_some() {
                    debug!(%key, "error cleared");
                }
            }
        }
        self
    }

    pub fn replay(events: impl IntoIterator<Item = DebuggerEvent>) -> Self {
        events.into_iter().fold(Self::default(), Self::reduce)
    }

    /// Every current error record reported for `entity_id`, whether keyed by
    /// the entity itself or by one of its properties.
    pub fn errors_for_entity<'a>(
        &'a self,
        entity_id: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Message)> + 'a {
        self.errors.iter().filter_map(move |(key, message)| {
            let source = message.source.as_ref()?;
            (source.id == entity_id).then_some((key.as_str(), message))
        })
    }

    pub fn filtered_logs<'a>(&'a self, filter: &'a LogFilter) -> impl Iterator<Item = &'a Message> + 'a {
        self.logs.iter().filter(move |message| filter.matches(message))
    }
}

/// Console view filter: an optional severity plus a case-insensitive search
/// over the log text and the source entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub search: Option<String>,
}

impl LogFilter {
    pub fn matches(&self, message: &Message) -> bool {
        if self.severity.is_some_and(|severity| severity != message.severity) {
            return false;
        }

        let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = search.to_lowercase();
        message.text.to_lowercase().contains(&needle)
            || message
                .source
                .as_ref()
                .is_some_and(|source| source.name.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
