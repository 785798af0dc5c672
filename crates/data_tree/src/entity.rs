use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{
    domain::{ActionConfig, ActionData, WidgetProps},
    protocol::ActionDescription,
};

use crate::dispatch::{run_action, RunActionDispatcher};

/// The five callables every tree exposes, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuiltinAction {
    NavigateTo,
    NavigateToUrl,
    ShowAlert,
    ShowModal,
    CloseModal,
}

impl BuiltinAction {
    pub const ALL: [BuiltinAction; 5] = [
        Self::NavigateTo,
        Self::NavigateToUrl,
        Self::ShowAlert,
        Self::ShowModal,
        Self::CloseModal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NavigateTo => "navigateTo",
            Self::NavigateToUrl => "navigateToUrl",
            Self::ShowAlert => "showAlert",
            Self::ShowModal => "showModal",
            Self::CloseModal => "closeModal",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Self::ShowAlert => 2,
            _ => 1,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTreeAction {
    pub config: ActionConfig,
    pub is_loading: bool,
    pub data: Value,
    pub run: RunActionDispatcher,
}

impl DataTreeAction {
    pub fn from_action(action: &ActionData) -> Self {
        let data = action
            .data
            .as_ref()
            .map(|response| response.body.clone())
            .unwrap_or_else(|| Value::Object(Map::new()));

        Self {
            config: action.config.clone(),
            is_loading: action.is_loading,
            data,
            run: RunActionDispatcher::new(action.config.id.clone()),
        }
    }

    pub fn run(&self, on_success: &str, on_error: &str) -> ActionDescription {
        run_action(&self.run, on_success, on_error)
    }
}

/// Kind tag of the serialized entity. Widget fields never shadow it.
pub const ENTITY_TYPE_FIELD: &str = "ENTITY_TYPE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTreeWidget {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DataTreeWidget {
    /// Static props first, runtime fields on top. The override is shallow:
    /// a runtime object replaces the static one instead of merging into it.
    pub fn from_props(widget: &WidgetProps, meta: Option<&Map<String, Value>>) -> Self {
        let mut fields = Map::new();
        fields.insert(
            "widgetId".into(),
            Value::String(widget.widget_id.as_str().to_string()),
        );
        fields.insert(
            "widgetName".into(),
            Value::String(widget.widget_name.clone()),
        );
        if let Some(widget_type) = &widget.widget_type {
            fields.insert("type".into(), Value::String(widget_type.clone()));
        }
        let overrides = widget.props.iter().chain(meta.into_iter().flatten());
        for (key, value) in overrides {
            if key != ENTITY_TYPE_FIELD {
                fields.insert(key.clone(), value.clone());
            }
        }

        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ENTITY_TYPE", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataTreeEntity {
    Action(DataTreeAction),
    Widget(DataTreeWidget),
    Callable { builtin: BuiltinAction },
}

impl DataTreeEntity {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Action(_) => "ACTION",
            Self::Widget(_) => "WIDGET",
            Self::Callable { .. } => "CALLABLE",
        }
    }

    pub fn as_action(&self) -> Option<&DataTreeAction> {
        match self {
            Self::Action(action) => Some(action),
            _ => None,
        }
    }

    pub fn as_widget(&self) -> Option<&DataTreeWidget> {
        match self {
            Self::Widget(widget) => Some(widget),
            _ => None,
        }
    }
}
