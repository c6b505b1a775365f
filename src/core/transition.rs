//! The record of a single firing outcome.

use serde::{Deserialize, Serialize};

/// An immutable `(source, destination, trigger)` triple.
///
/// Built once per fire and passed by reference through every exit and entry
/// action the firing runs.
///
/// # Example
///
/// ```rust
/// use substate::core::Transition;
///
/// let transition = Transition::new("idle", "busy", "start");
/// assert!(!transition.is_reentry());
///
/// let again = Transition::new("busy", "busy", "poke");
/// assert!(again.is_reentry());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<S, T> {
    source: S,
    destination: S,
    trigger: T,
}

impl<S: PartialEq, T> Transition<S, T> {
    pub fn new(source: S, destination: S, trigger: T) -> Self {
        Self {
            source,
            destination,
            trigger,
        }
    }

    /// The state the machine was in when the trigger fired.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The state the machine moves to.
    pub fn destination(&self) -> &S {
        &self.destination
    }

    /// The trigger that caused the transition.
    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    /// True when source and destination are the same state.
    ///
    /// A reentry re-runs only that state's own exit and entry actions.
    pub fn is_reentry(&self) -> bool {
        self.source == self.destination
    }
}
