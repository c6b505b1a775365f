//! Configuration-time errors.

use thiserror::Error;

/// Errors that can occur while configuring a state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error(
        "A fixed permit from '{state}' may not target '{state}' itself. \
         Use ignore() or permit_reentry() instead"
    )]
    SelfTransitionIgnoredOrReentrant { state: String },

    #[error("State '{state}' is already a substate of '{existing}', cannot make it a substate of '{requested}'")]
    SuperstateAlreadySet {
        state: String,
        existing: String,
        requested: String,
    },

    #[error("Making '{state}' a substate of '{superstate}' would create a cycle")]
    CyclicHierarchy { state: String, superstate: String },

    #[error("Parameters for trigger '{trigger}' have already been configured")]
    ParametersAlreadyConfigured { trigger: String },
}
