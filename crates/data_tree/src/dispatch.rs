//! Dispatchers: pure functions that turn call arguments into intent records.

use serde::{Deserialize, Serialize};
use shared::{
    domain::ActionId,
    error::InvokeError,
    protocol::{ActionDescription, RunActionPayload},
};

use crate::entity::BuiltinAction;

/// The `run` member of an action entity, bound to one action id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunActionDispatcher {
    pub action_id: ActionId,
}

impl RunActionDispatcher {
    pub fn new(action_id: ActionId) -> Self {
        Self { action_id }
    }
}

/// Callback expressions are handed back to the evaluator as bindings, so a
/// non-empty one is re-wrapped in `{{ }}`.
pub fn run_action(
    dispatcher: &RunActionDispatcher,
    on_success: &str,
    on_error: &str,
) -> ActionDescription {
    ActionDescription::RunAction(RunActionPayload {
        action_id: dispatcher.action_id.clone(),
        on_success: as_binding(on_success),
        on_error: as_binding(on_error),
    })
}

fn as_binding(expression: &str) -> String {
    if expression.is_empty() {
        String::new()
    } else {
        format!("{{{{{expression}}}}}")
    }
}

pub fn navigate_to(page_name: impl Into<String>) -> ActionDescription {
    ActionDescription::NavigateTo {
        page_name: page_name.into(),
    }
}

pub fn navigate_to_url(url: impl Into<String>) -> ActionDescription {
    ActionDescription::NavigateToUrl { url: url.into() }
}

pub fn show_alert(message: impl Into<String>, style: impl Into<String>) -> ActionDescription {
    ActionDescription::ShowAlert {
        message: message.into(),
        style: style.into(),
    }
}

pub fn show_modal(modal_name: impl Into<String>) -> ActionDescription {
    ActionDescription::ShowModalByName {
        modal_name: modal_name.into(),
    }
}

pub fn close_modal(modal_name: impl Into<String>) -> ActionDescription {
    ActionDescription::CloseModal {
        modal_name: modal_name.into(),
    }
}

impl BuiltinAction {
    pub fn dispatch(self, args: &[String]) -> Result<ActionDescription, InvokeError> {
        let intent = match (self, args) {
            (Self::NavigateTo, [page_name]) => navigate_to(page_name.as_str()),
            (Self::NavigateToUrl, [url]) => navigate_to_url(url.as_str()),
            (Self::ShowAlert, [message, style]) => show_alert(message.as_str(), style.as_str()),
            (Self::ShowModal, [modal_name]) => show_modal(modal_name.as_str()),
            (Self::CloseModal, [modal_name]) => close_modal(modal_name.as_str()),
            _ => {
                return Err(InvokeError::Arity {
                    name: self.name().to_string(),
                    expected: self.arity(),
                    got: args.len(),
                })
            }
        };
        Ok(intent)
    }
}
