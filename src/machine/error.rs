//! Errors raised while firing triggers.

use crate::core::ParameterError;
use thiserror::Error;

/// Failure reported by an entry or exit action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// A typed action could not unpack the trigger's arguments.
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error("{0}")]
    Failed(String),
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        ActionError::Failed(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        ActionError::Failed(message.to_string())
    }
}

/// Errors that can occur when firing a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireError {
    #[error("No transition is permitted from state '{state}' for trigger '{trigger}'")]
    Unhandled { trigger: String, state: String },

    #[error("Trigger '{trigger}' is configured for state '{state}' but no guard condition is met")]
    GuardsUnsatisfied { trigger: String, state: String },

    #[error(
        "Multiple transitions are permitted from state '{state}' for trigger '{trigger}'; \
         guard conditions must be mutually exclusive"
    )]
    AmbiguousGuards { trigger: String, state: String },

    #[error("Trigger '{trigger}' is ignored in state '{state}'")]
    TriggerIgnored { trigger: String, state: String },

    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error("Action failed in state '{state}': {source}")]
    ActionFailed {
        state: String,
        #[source]
        source: ActionError,
    },
}
