use thiserror::Error;

/// Reasons a path cannot be invoked against an entity tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("'{0}' is not a registered action path")]
    NotInvocable(String),
    #[error("no entity named '{0}' in the tree")]
    UnknownEntity(String),
    #[error("'{name}' is not an action entity")]
    NotAnAction { name: String },
    #[error("'{name}' takes {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
}
