//! Per-state configuration: trigger table, entry and exit actions, and the
//! links into the state hierarchy.

use crate::core::{describe, Argument, State, Transition, Trigger};
use crate::machine::behavior::TriggerBehavior;
use crate::machine::error::{ActionError, FireError};
use std::collections::HashMap;
use std::fmt;

/// Action run when a state is entered. Receives the firing's arguments.
pub type EntryAction<S, T> = Box<dyn Fn(&Transition<S, T>, &[Argument]) -> Result<(), ActionError>>;

/// Action run when a state is exited.
pub type ExitAction<S, T> = Box<dyn Fn(&Transition<S, T>) -> Result<(), ActionError>>;

/// Stable handle to a node inside a [`StateGraph`](crate::machine::StateGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// An action plus the trigger it is restricted to, if any.
struct Hook<T, A> {
    trigger: Option<T>,
    action: A,
}

impl<T: PartialEq, A> Hook<T, A> {
    fn applies_to(&self, trigger: &T) -> bool {
        match &self.trigger {
            Some(only) => only == trigger,
            None => true,
        }
    }
}

/// Outcome of looking a trigger up in one node, ignoring the hierarchy.
pub(crate) enum LocalMatch<'a, S, T> {
    NotConfigured,
    GuardedOut,
    Found(&'a TriggerBehavior<S, T>),
    Ambiguous,
}

/// One state's representation.
pub struct StateNode<S, T> {
    state: S,
    behaviors: HashMap<T, Vec<TriggerBehavior<S, T>>>,
    entry_actions: Vec<Hook<T, EntryAction<S, T>>>,
    exit_actions: Vec<Hook<T, ExitAction<S, T>>>,
    pub(crate) superstate: Option<NodeId>,
    pub(crate) substates: Vec<NodeId>,
}

impl<S: State, T: Trigger> StateNode<S, T> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            behaviors: HashMap::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            superstate: None,
            substates: Vec::new(),
        }
    }

    /// The state this node represents.
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn superstate(&self) -> Option<NodeId> {
        self.superstate
    }

    pub fn substates(&self) -> &[NodeId] {
        &self.substates
    }

    /// Whether any behavior, guarded or not, is registered for `trigger`.
    pub fn configures(&self, trigger: &T) -> bool {
        self.behaviors.contains_key(trigger)
    }

    /// Behaviors grouped by trigger, each list in registration order.
    pub fn trigger_behaviors(&self) -> impl Iterator<Item = (&T, &[TriggerBehavior<S, T>])> {
        self.behaviors
            .iter()
            .map(|(trigger, list)| (trigger, list.as_slice()))
    }

    pub(crate) fn add_trigger_behavior(&mut self, behavior: TriggerBehavior<S, T>) {
        self.behaviors
            .entry(behavior.trigger().clone())
            .or_default()
            .push(behavior);
    }

    pub(crate) fn add_entry_action(&mut self, trigger: Option<T>, action: EntryAction<S, T>) {
        self.entry_actions.push(Hook { trigger, action });
    }

    pub(crate) fn add_exit_action(&mut self, trigger: Option<T>, action: ExitAction<S, T>) {
        self.exit_actions.push(Hook { trigger, action });
    }

    pub(crate) fn local_match(&self, trigger: &T) -> LocalMatch<'_, S, T> {
        let Some(candidates) = self.behaviors.get(trigger) else {
            return LocalMatch::NotConfigured;
        };

        let mut active = candidates.iter().filter(|b| b.is_guard_condition_met());
        match (active.next(), active.next()) {
            (None, _) => LocalMatch::GuardedOut,
            (Some(behavior), None) => LocalMatch::Found(behavior),
            (Some(_), Some(_)) => LocalMatch::Ambiguous,
        }
    }

    /// Triggers with at least one behavior whose guard currently passes.
    pub(crate) fn locally_permitted(&self) -> impl Iterator<Item = &T> {
        self.behaviors
            .iter()
            .filter(|(_, list)| list.iter().any(|b| b.is_guard_condition_met()))
            .map(|(trigger, _)| trigger)
    }

    pub(crate) fn execute_entry_actions(
        &self,
        transition: &Transition<S, T>,
        args: &[Argument],
    ) -> Result<(), FireError> {
        for hook in self
            .entry_actions
            .iter()
            .filter(|h| h.applies_to(transition.trigger()))
        {
            (hook.action)(transition, args).map_err(|source| self.action_failed(source))?;
        }
        Ok(())
    }

    pub(crate) fn execute_exit_actions(
        &self,
        transition: &Transition<S, T>,
    ) -> Result<(), FireError> {
        for hook in self
            .exit_actions
            .iter()
            .filter(|h| h.applies_to(transition.trigger()))
        {
            (hook.action)(transition).map_err(|source| self.action_failed(source))?;
        }
        Ok(())
    }

    fn action_failed(&self, source: ActionError) -> FireError {
        FireError::ActionFailed {
            state: describe(&self.state),
            source,
        }
    }
}

impl<S: fmt::Debug, T> fmt::Debug for StateNode<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("state", &self.state)
            .field("triggers", &self.behaviors.len())
            .field("entry_actions", &self.entry_actions.len())
            .field("exit_actions", &self.exit_actions.len())
            .field("superstate", &self.superstate)
            .field("substates", &self.substates)
            .finish()
    }
}
