use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use shared::{error::InvokeError, protocol::ActionDescription};

use crate::entity::{BuiltinAction, DataTreeEntity};

const RUN_SUFFIX: &str = ".run";

/// Flat name -> entity namespace, plus the registry of dotted paths that the
/// evaluator may call as functions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTree {
    pub entities: BTreeMap<String, DataTreeEntity>,
    pub action_paths: Vec<String>,
}

impl DataTree {
    pub fn get(&self, name: &str) -> Option<&DataTreeEntity> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_invocable(&self, path: &str) -> bool {
        self.action_paths.iter().any(|registered| registered == path)
    }

    /// Looks up a dotted path (`Input1.text`, `getUsers.data.0.name`) in the
    /// JSON view of an entity. Array elements are addressed by index.
    pub fn resolve(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let entity = self.get(segments.next()?)?;
        let mut current = serde_json::to_value(entity).ok()?;

        for segment in segments {
            current = match current {
                Value::Object(mut map) => map.remove(segment)?,
                Value::Array(mut items) => {
                    let index = segment.parse::<usize>().ok()?;
                    if index >= items.len() {
                        return None;
                    }
                    items.swap_remove(index)
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Calls a registered path. Arguments arrive as evaluated JSON values and
    /// are passed on as strings; `run` treats missing callbacks as empty.
    pub fn invoke(&self, path: &str, args: &[Value]) -> Result<ActionDescription, InvokeError> {
        if !self.is_invocable(path) {
            return Err(InvokeError::NotInvocable(path.to_string()));
        }
        let args: Vec<String> = args.iter().map(argument_text).collect();

        match path.strip_suffix(RUN_SUFFIX) {
            Some(name) => {
                let action = self
                    .get(name)
                    .ok_or_else(|| InvokeError::UnknownEntity(name.to_string()))?
                    .as_action()
                    .ok_or_else(|| InvokeError::NotAnAction {
                        name: name.to_string(),
                    })?;
                if args.len() > 2 {
                    return Err(InvokeError::Arity {
                        name: path.to_string(),
                        expected: 2,
                        got: args.len(),
                    });
                }
                let on_success = args.first().map(String::as_str).unwrap_or_default();
                let on_error = args.get(1).map(String::as_str).unwrap_or_default();
                Ok(action.run(on_success, on_error))
            }
            _ => match self.get(path) {
                Some(DataTreeEntity::Callable { builtin }) => builtin.dispatch(&args),
                Some(_) => Err(InvokeError::NotInvocable(path.to_string())),
                None => Err(InvokeError::UnknownEntity(path.to_string())),
            },
        }
    }

    pub fn builtin_paths() -> impl Iterator<Item = &'static str> {
        BuiltinAction::ALL.into_iter().map(BuiltinAction::name)
    }
}

fn argument_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
