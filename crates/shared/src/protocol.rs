use serde::{Deserialize, Serialize};

use crate::domain::ActionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunActionPayload {
    pub action_id: ActionId,
    pub on_success: String,
    pub on_error: String,
}

/// Intent record returned by every dispatcher. It describes a command for the
/// dispatch layer; building one never performs the effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum ActionDescription {
    RunAction(RunActionPayload),
    #[serde(rename_all = "camelCase")]
    NavigateTo {
        page_name: String,
    },
    NavigateToUrl {
        url: String,
    },
    ShowAlert {
        message: String,
        style: String,
    },
    #[serde(rename_all = "camelCase")]
    ShowModalByName {
        modal_name: String,
    },
    #[serde(rename_all = "camelCase")]
    CloseModal {
        modal_name: String,
    },
}

impl ActionDescription {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RunAction(_) => "RUN_ACTION",
            Self::NavigateTo { .. } => "NAVIGATE_TO",
            Self::NavigateToUrl { .. } => "NAVIGATE_TO_URL",
            Self::ShowAlert { .. } => "SHOW_ALERT",
            Self::ShowModalByName { .. } => "SHOW_MODAL_BY_NAME",
            Self::CloseModal { .. } => "CLOSE_MODAL",
        }
    }
}
