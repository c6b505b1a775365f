//! Problems a configuration audit can report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration that is legal to build but will misbehave when fired.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigurationIssue<S, T> {
    /// Two or more unguarded behaviors: firing always fails as ambiguous.
    #[error("State {state:?} has {count} unguarded behaviors for trigger {trigger:?}")]
    GuaranteedAmbiguity { state: S, trigger: T, count: usize },

    /// One unguarded behavior next to guarded ones: firing fails as ambiguous
    /// whenever any of the guarded ones passes.
    #[error("State {state:?} mixes an unguarded behavior with guarded ones for trigger {trigger:?}")]
    UnconditionalOverlap { state: S, trigger: T },

    #[error("Parameters are declared for trigger {trigger:?} but no state configures it")]
    UnusedParameters { trigger: T },
}
