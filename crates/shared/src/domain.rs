use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ActionId);
id_newtype!(WidgetId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    pub id: ActionId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActionConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ActionId(id.into()),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(default)]
    pub is_execution_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl ActionResponse {
    pub fn with_body(body: Value) -> Self {
        Self {
            body,
            headers: BTreeMap::new(),
            status_code: None,
            is_execution_success: true,
            duration: None,
            size: None,
        }
    }
}

/// One persisted action as the host keeps it: configuration plus the last
/// response, if the action has run at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    pub config: ActionConfig,
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ActionResponse>,
}

impl ActionData {
    pub fn new(config: ActionConfig) -> Self {
        Self {
            config,
            is_loading: false,
            data: None,
        }
    }

    pub fn with_response(mut self, response: ActionResponse) -> Self {
        self.data = Some(response);
        self
    }
}

/// Static widget configuration. Everything except the identity fields is
/// kept as an opaque property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProps {
    pub widget_id: WidgetId,
    pub widget_name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<String>,
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl WidgetProps {
    pub fn new(widget_id: impl Into<String>, widget_name: impl Into<String>) -> Self {
        Self {
            widget_id: WidgetId(widget_id.into()),
            widget_name: widget_name.into(),
            widget_type: None,
            props: Map::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }
}

pub type CanvasWidgets = BTreeMap<WidgetId, WidgetProps>;

/// Runtime widget state keyed by the same identifier as [`CanvasWidgets`].
pub type MetaState = BTreeMap<WidgetId, Map<String, Value>>;
