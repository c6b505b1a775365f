//! The state machine proper: current state, node registry and `fire`.

use crate::builder::{ConfigurationError, StateConfiguration};
use crate::core::{
    describe, Argument, ParameterSchema, ParameterizedTrigger, Parameters, State, Transition,
    Trigger,
};
use crate::machine::error::FireError;
use crate::machine::graph::StateGraph;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Outcome of a successful fire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fired<S, T> {
    /// The machine moved (or re-entered) along this transition.
    Transitioned(Transition<S, T>),

    /// The trigger is configured to be ignored in the current state.
    Ignored,
}

impl<S, T> Fired<S, T> {
    pub fn transition(&self) -> Option<&Transition<S, T>> {
        match self {
            Self::Transitioned(transition) => Some(transition),
            Self::Ignored => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// A hierarchical state machine.
///
/// Holds the current state and the configuration of every state. `fire`
/// is the only operation that changes the current state. The machine is
/// single-threaded: actions run inline on the caller's thread and
/// concurrent use must be serialized by the caller.
///
/// # Example
///
/// ```rust
/// use substate::machine::StateMachine;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut machine = StateMachine::new("idle");
/// machine.configure("idle").permit("start", "running")?;
/// machine.configure("running").permit("stop", "idle")?;
///
/// machine.fire("start")?;
/// assert_eq!(machine.state(), &"running");
/// assert!(!machine.can_fire(&"start"));
/// # Ok(())
/// # }
/// ```
pub struct StateMachine<S, T> {
    current: S,
    graph: StateGraph<S, T>,
    parameters: HashMap<T, ParameterSchema>,
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Create an unconfigured machine in `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            graph: StateGraph::new(),
            parameters: HashMap::new(),
        }
    }

    /// Current state (pure).
    pub fn state(&self) -> &S {
        &self.current
    }

    /// True if the current state is `state` or one of its substates.
    pub fn is_in_state(&self, state: &S) -> bool {
        match self.graph.find(&self.current) {
            Some(id) => self.graph.is_included_in(id, state),
            None => &self.current == state,
        }
    }

    /// Begin configuring `state`, creating its node if needed.
    pub fn configure(&mut self, state: S) -> StateConfiguration<'_, S, T> {
        StateConfiguration::new(&mut self.graph, state)
    }

    /// The configured state graph.
    pub fn graph(&self) -> &StateGraph<S, T> {
        &self.graph
    }

    /// Declare that every firing of `trigger` carries arguments of the types
    /// in `P`, and get a typed handle for configuring and firing it.
    ///
    /// ```rust
    /// use substate::machine::StateMachine;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut machine = StateMachine::new("open");
    /// let assign = machine.set_trigger_parameters::<(String,)>("assign")?;
    /// machine
    ///     .configure("open")
    ///     .permit_dynamic_with(&assign, |(who,)| {
    ///         if who.is_empty() {
    ///             "open"
    ///         } else {
    ///             "assigned"
    ///         }
    ///     });
    ///
    /// machine.fire_with(&assign, ("ada".to_string(),))?;
    /// assert_eq!(machine.state(), &"assigned");
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_trigger_parameters<P: Parameters>(
        &mut self,
        trigger: T,
    ) -> Result<ParameterizedTrigger<T, P>, ConfigurationError> {
        self.declare_parameters(trigger.clone(), ParameterSchema::new(P::argument_types()))?;
        Ok(ParameterizedTrigger::new(trigger))
    }

    /// Untyped form of [`set_trigger_parameters`](Self::set_trigger_parameters).
    pub fn declare_parameters(
        &mut self,
        trigger: T,
        schema: ParameterSchema,
    ) -> Result<(), ConfigurationError> {
        if self.parameters.contains_key(&trigger) {
            return Err(ConfigurationError::ParametersAlreadyConfigured {
                trigger: describe(&trigger),
            });
        }
        self.parameters.insert(trigger, schema);
        Ok(())
    }

    /// The declared argument schema of `trigger`, if any.
    pub fn parameters(&self, trigger: &T) -> Option<&ParameterSchema> {
        self.parameters.get(trigger)
    }

    pub(crate) fn parameter_schemas(&self) -> impl Iterator<Item = (&T, &ParameterSchema)> {
        self.parameters.iter()
    }

    /// Fire a trigger without arguments.
    pub fn fire(&mut self, trigger: T) -> Result<Fired<S, T>, FireError> {
        self.fire_with_args(trigger, Vec::new())
    }

    /// Fire a parameterized trigger with typed arguments.
    pub fn fire_with<P: Parameters>(
        &mut self,
        trigger: &ParameterizedTrigger<T, P>,
        parameters: P,
    ) -> Result<Fired<S, T>, FireError> {
        self.fire_with_args(trigger.trigger().clone(), parameters.into_arguments())
    }

    /// Fire a trigger with a raw argument list.
    ///
    /// Arguments are validated against the trigger's declared schema before
    /// resolution. The current state is updated before exit and entry actions
    /// run, so a failing action leaves the machine in the destination state.
    pub fn fire_with_args(
        &mut self,
        trigger: T,
        args: Vec<Argument>,
    ) -> Result<Fired<S, T>, FireError> {
        if let Some(schema) = self.parameters.get(&trigger) {
            if let Err(err) = schema.validate(&args) {
                debug!(trigger = ?trigger, error = %err, "rejected trigger arguments");
                return Err(err.into());
            }
        }

        let Some(source) = self.graph.find(&self.current) else {
            debug!(trigger = ?trigger, state = ?self.current, "trigger unhandled");
            return Err(FireError::Unhandled {
                trigger: describe(&trigger),
                state: describe(&self.current),
            });
        };

        let behavior = self
            .graph
            .resolve(source, &trigger)
            .inspect_err(|err| debug!(trigger = ?trigger, error = %err, "trigger rejected"))?;

        let destination = match behavior.destination(&self.current, &args) {
            Ok(destination) => destination,
            Err(FireError::TriggerIgnored { .. }) => {
                debug!(trigger = ?trigger, state = ?self.current, "trigger ignored");
                return Ok(Fired::Ignored);
            }
            Err(err) => return Err(err),
        };

        let transition = Transition::new(self.current.clone(), destination, trigger);
        debug!(
            trigger = ?transition.trigger(),
            source = ?transition.source(),
            destination = ?transition.destination(),
            reentry = transition.is_reentry(),
            "firing transition"
        );

        self.current = transition.destination().clone();
        self.graph.exit(source, &transition)?;
        if let Some(target) = self.graph.find(transition.destination()) {
            self.graph.enter(target, &transition, &args)?;
        }

        Ok(Fired::Transitioned(transition))
    }

    /// Whether `trigger` would be accepted in the current state.
    pub fn can_fire(&self, trigger: &T) -> bool {
        self.graph
            .find(&self.current)
            .is_some_and(|id| self.graph.can_handle(id, trigger))
    }

    /// Triggers accepted in the current state, including inherited ones.
    pub fn permitted_triggers(&self) -> HashSet<T> {
        self.graph
            .find(&self.current)
            .map(|id| self.graph.permitted_triggers(id))
            .unwrap_or_default()
    }
}

impl<S: std::fmt::Debug, T> std::fmt::Debug for StateMachine<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("states", &self.graph.len())
            .field("parameterized_triggers", &self.parameters.len())
            .finish()
    }
}
