//! Fluent configuration of a single state.

use crate::builder::error::ConfigurationError;
use crate::core::{
    describe, Argument, Guard, ParameterizedTrigger, Parameters, State, Transition, Trigger,
};
use crate::machine::{ActionError, NodeId, StateGraph, TriggerBehavior};

/// Builder for one state's triggers, actions and superstate.
///
/// Obtained from [`StateMachine::configure`](crate::machine::StateMachine::configure).
/// Every method consumes and returns the builder so calls chain; methods
/// that can reject a declaration return `Result` so chains use `?`.
///
/// # Example
///
/// ```rust
/// use substate::machine::StateMachine;
///
/// # fn main() -> Result<(), substate::builder::ConfigurationError> {
/// let mut machine = StateMachine::new("off");
///
/// machine
///     .configure("off")
///     .permit("switch", "on")?
///     .ignore("dim");
///
/// machine
///     .configure("on")
///     .permit("switch", "off")?
///     .permit_reentry("dim")
///     .on_entry(|t| println!("light on via {:?}", t.trigger()));
/// # Ok(())
/// # }
/// ```
pub struct StateConfiguration<'m, S, T> {
    graph: &'m mut StateGraph<S, T>,
    node: NodeId,
}

impl<'m, S: State, T: Trigger> StateConfiguration<'m, S, T> {
    pub(crate) fn new(graph: &'m mut StateGraph<S, T>, state: S) -> Self {
        let node = graph.get_or_insert(state);
        Self { graph, node }
    }

    /// The state being configured.
    pub fn state(&self) -> &S {
        self.graph.node(self.node).state()
    }

    /// Register a raw behavior for this state.
    pub fn behavior(self, behavior: TriggerBehavior<S, T>) -> Self {
        self.graph.node_mut(self.node).add_trigger_behavior(behavior);
        self
    }

    /// Accept `trigger` and move to `destination`.
    ///
    /// `destination` must differ from the configured state; use
    /// [`permit_reentry`](Self::permit_reentry) or [`ignore`](Self::ignore)
    /// for triggers that keep the state.
    pub fn permit(self, trigger: T, destination: S) -> Result<Self, ConfigurationError> {
        self.permit_guarded(trigger, destination, Guard::always())
    }

    /// Like [`permit`](Self::permit), active only while `guard` returns true.
    pub fn permit_if<G>(
        self,
        trigger: T,
        destination: S,
        guard: G,
    ) -> Result<Self, ConfigurationError>
    where
        G: Fn() -> bool + 'static,
    {
        self.permit_guarded(trigger, destination, Guard::new(guard))
    }

    fn permit_guarded(
        self,
        trigger: T,
        destination: S,
        guard: Guard,
    ) -> Result<Self, ConfigurationError> {
        if &destination == self.state() {
            return Err(ConfigurationError::SelfTransitionIgnoredOrReentrant {
                state: describe(self.state()),
            });
        }
        Ok(self.behavior(TriggerBehavior::transitioning(trigger, destination, guard)))
    }

    /// Accept `trigger`, re-running this state's own exit and entry actions.
    ///
    /// Superstate actions are not run.
    pub fn permit_reentry(self, trigger: T) -> Self {
        let state = self.state().clone();
        self.behavior(TriggerBehavior::transitioning(trigger, state, Guard::always()))
    }

    pub fn permit_reentry_if<G>(self, trigger: T, guard: G) -> Self
    where
        G: Fn() -> bool + 'static,
    {
        let state = self.state().clone();
        self.behavior(TriggerBehavior::transitioning(trigger, state, Guard::new(guard)))
    }

    /// Accept `trigger` without changing state or running any action.
    pub fn ignore(self, trigger: T) -> Self {
        self.behavior(TriggerBehavior::ignored(trigger, Guard::always()))
    }

    pub fn ignore_if<G>(self, trigger: T, guard: G) -> Self
    where
        G: Fn() -> bool + 'static,
    {
        self.behavior(TriggerBehavior::ignored(trigger, Guard::new(guard)))
    }

    /// Accept `trigger` and move to the state `selector` returns at fire time.
    pub fn permit_dynamic<F>(self, trigger: T, selector: F) -> Self
    where
        F: Fn() -> S + 'static,
    {
        self.permit_dynamic_guarded(trigger, selector, Guard::always())
    }

    pub fn permit_dynamic_if<F, G>(self, trigger: T, selector: F, guard: G) -> Self
    where
        F: Fn() -> S + 'static,
        G: Fn() -> bool + 'static,
    {
        self.permit_dynamic_guarded(trigger, selector, Guard::new(guard))
    }

    fn permit_dynamic_guarded<F>(self, trigger: T, selector: F, guard: Guard) -> Self
    where
        F: Fn() -> S + 'static,
    {
        self.behavior(TriggerBehavior::dynamic(
            trigger,
            move |_: &[Argument]| Ok(selector()),
            guard,
        ))
    }

    /// Dynamic permit whose selector reads the raw argument list.
    pub fn permit_dynamic_from_args<F>(self, trigger: T, selector: F) -> Self
    where
        F: Fn(&[Argument]) -> S + 'static,
    {
        self.behavior(TriggerBehavior::dynamic(
            trigger,
            move |args: &[Argument]| Ok(selector(args)),
            Guard::always(),
        ))
    }

    /// Dynamic permit for a parameterized trigger; the selector receives the
    /// typed arguments.
    pub fn permit_dynamic_with<P, F>(
        self,
        trigger: &ParameterizedTrigger<T, P>,
        selector: F,
    ) -> Self
    where
        P: Parameters,
        F: Fn(P) -> S + 'static,
    {
        self.permit_dynamic_with_guarded(trigger, selector, Guard::always())
    }

    pub fn permit_dynamic_with_if<P, F, G>(
        self,
        trigger: &ParameterizedTrigger<T, P>,
        selector: F,
        guard: G,
    ) -> Self
    where
        P: Parameters,
        F: Fn(P) -> S + 'static,
        G: Fn() -> bool + 'static,
    {
        self.permit_dynamic_with_guarded(trigger, selector, Guard::new(guard))
    }

    fn permit_dynamic_with_guarded<P, F>(
        self,
        trigger: &ParameterizedTrigger<T, P>,
        selector: F,
        guard: Guard,
    ) -> Self
    where
        P: Parameters,
        F: Fn(P) -> S + 'static,
    {
        self.behavior(TriggerBehavior::dynamic(
            trigger.trigger().clone(),
            move |args: &[Argument]| Ok(selector(P::unpack(args)?)),
            guard,
        ))
    }

    /// Run `action` whenever the state is entered.
    pub fn on_entry<F>(self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) + 'static,
    {
        self.entry_hook(None, move |transition: &Transition<S, T>, _: &[Argument]| {
            action(transition);
            Ok(())
        })
    }

    /// Entry action that also receives the firing's raw arguments.
    pub fn on_entry_with_args<F>(self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>, &[Argument]) + 'static,
    {
        self.entry_hook(None, move |transition: &Transition<S, T>, args: &[Argument]| {
            action(transition, args);
            Ok(())
        })
    }

    /// Entry action whose failure aborts the remaining traversal.
    pub fn try_on_entry<F>(self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> Result<(), ActionError> + 'static,
    {
        self.entry_hook(None, move |transition: &Transition<S, T>, _: &[Argument]| {
            action(transition)
        })
    }

    /// Run `action` only when the state is entered through `trigger`.
    pub fn on_entry_from<F>(self, trigger: T, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) + 'static,
    {
        self.entry_hook(
            Some(trigger),
            move |transition: &Transition<S, T>, _: &[Argument]| {
                action(transition);
                Ok(())
            },
        )
    }

    /// Run `action` with the typed arguments when the state is entered
    /// through a parameterized trigger.
    pub fn on_entry_from_with<P, F>(self, trigger: &ParameterizedTrigger<T, P>, action: F) -> Self
    where
        P: Parameters,
        F: Fn(P, &Transition<S, T>) + 'static,
    {
        self.entry_hook(
            Some(trigger.trigger().clone()),
            move |transition: &Transition<S, T>, args: &[Argument]| {
                action(P::unpack(args)?, transition);
                Ok(())
            },
        )
    }

    fn entry_hook<F>(self, trigger: Option<T>, action: F) -> Self
    where
        F: Fn(&Transition<S, T>, &[Argument]) -> Result<(), ActionError> + 'static,
    {
        self.graph
            .node_mut(self.node)
            .add_entry_action(trigger, Box::new(action));
        self
    }

    /// Run `action` whenever the state is exited.
    pub fn on_exit<F>(self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) + 'static,
    {
        self.exit_hook(None, move |transition: &Transition<S, T>| {
            action(transition);
            Ok(())
        })
    }

    /// Run `action` only when the state is exited through `trigger`.
    pub fn on_exit_from<F>(self, trigger: T, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) + 'static,
    {
        self.exit_hook(Some(trigger), move |transition: &Transition<S, T>| {
            action(transition);
            Ok(())
        })
    }

    pub fn try_on_exit<F>(self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> Result<(), ActionError> + 'static,
    {
        self.exit_hook(None, action)
    }

    fn exit_hook<F>(self, trigger: Option<T>, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) -> Result<(), ActionError> + 'static,
    {
        self.graph
            .node_mut(self.node)
            .add_exit_action(trigger, Box::new(action));
        self
    }

    /// Make this state a substate of `superstate`.
    ///
    /// The substate inherits every trigger the superstate accepts. Entering
    /// the substate from outside the superstate runs the superstate's entry
    /// actions first; leaving to outside runs its exit actions last.
    pub fn substate_of(self, superstate: S) -> Result<Self, ConfigurationError> {
        let parent = self.graph.get_or_insert(superstate);
        self.graph.set_superstate(self.node, parent)?;
        Ok(self)
    }
}
