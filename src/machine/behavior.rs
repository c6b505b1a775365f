//! What a trigger does in a state.
//!
//! Every configured trigger maps to one or more [`TriggerBehavior`]s. A
//! behavior is a candidate when its guard passes at fire time, and its
//! [`BehaviorKind`] decides the outcome: ignore the trigger, move to a fixed
//! state, or compute the destination from the firing's arguments.

use crate::core::{describe, Argument, Guard, ParameterError, State, Trigger};
use crate::machine::error::FireError;
use std::fmt;

/// Computes a destination state from a firing's arguments.
pub type DestinationSelector<S> = Box<dyn Fn(&[Argument]) -> Result<S, ParameterError>>;

/// The three outcomes a behavior can produce.
pub enum BehaviorKind<S> {
    /// Accept the trigger without changing state or running actions.
    Ignored,

    /// Move to a state fixed at configuration time.
    Transitioning { destination: S },

    /// Move to a state chosen at fire time.
    Dynamic { selector: DestinationSelector<S> },
}

impl<S: fmt::Debug> fmt::Debug for BehaviorKind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => f.write_str("Ignored"),
            Self::Transitioning { destination } => f
                .debug_struct("Transitioning")
                .field("destination", destination)
                .finish(),
            Self::Dynamic { .. } => f.debug_struct("Dynamic").finish_non_exhaustive(),
        }
    }
}

/// A guarded behavior registered for one trigger.
pub struct TriggerBehavior<S, T> {
    trigger: T,
    guard: Guard,
    kind: BehaviorKind<S>,
}

impl<S: State, T: Trigger> TriggerBehavior<S, T> {
    pub fn ignored(trigger: T, guard: Guard) -> Self {
        Self {
            trigger,
            guard,
            kind: BehaviorKind::Ignored,
        }
    }

    pub fn transitioning(trigger: T, destination: S, guard: Guard) -> Self {
        Self {
            trigger,
            guard,
            kind: BehaviorKind::Transitioning { destination },
        }
    }

    pub fn dynamic<F>(trigger: T, selector: F, guard: Guard) -> Self
    where
        F: Fn(&[Argument]) -> Result<S, ParameterError> + 'static,
    {
        Self {
            trigger,
            guard,
            kind: BehaviorKind::Dynamic {
                selector: Box::new(selector),
            },
        }
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn kind(&self) -> &BehaviorKind<S> {
        &self.kind
    }

    /// Evaluate the guard now.
    pub fn is_guard_condition_met(&self) -> bool {
        self.guard.check()
    }

    /// The state a firing from `source` with `args` leads to.
    ///
    /// Ignored behaviors have no destination and report
    /// [`FireError::TriggerIgnored`]; the engine turns that into a no-op.
    pub fn destination(&self, source: &S, args: &[Argument]) -> Result<S, FireError> {
        match &self.kind {
            BehaviorKind::Ignored => Err(FireError::TriggerIgnored {
                trigger: describe(&self.trigger),
                state: describe(source),
            }),
            BehaviorKind::Transitioning { destination } => Ok(destination.clone()),
            BehaviorKind::Dynamic { selector } => Ok(selector(args)?),
        }
    }
}

impl<S: fmt::Debug, T: fmt::Debug> fmt::Debug for TriggerBehavior<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerBehavior")
            .field("trigger", &self.trigger)
            .field("guard", &self.guard)
            .field("kind", &self.kind)
            .finish()
    }
}
