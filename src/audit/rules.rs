//! Individual audit checks.

use crate::audit::issues::ConfigurationIssue;
use crate::core::{ParameterSchema, State, Trigger};
use crate::machine::{StateGraph, StateNode};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a single audit check.
pub type AuditCheck<S, T> = Validation<(), NonEmptyVec<ConfigurationIssue<S, T>>>;

/// Check every trigger of one node for behaviors that cannot be told apart.
pub fn guard_overlaps<S: State, T: Trigger>(node: &StateNode<S, T>) -> Vec<AuditCheck<S, T>> {
    node.trigger_behaviors()
        .map(|(trigger, behaviors)| {
            let unguarded = behaviors
                .iter()
                .filter(|b| b.guard().is_unconditional())
                .count();

            if unguarded >= 2 {
                Validation::fail(ConfigurationIssue::GuaranteedAmbiguity {
                    state: node.state().clone(),
                    trigger: trigger.clone(),
                    count: unguarded,
                })
            } else if unguarded == 1 && behaviors.len() > 1 {
                Validation::fail(ConfigurationIssue::UnconditionalOverlap {
                    state: node.state().clone(),
                    trigger: trigger.clone(),
                })
            } else {
                Validation::success(())
            }
        })
        .collect()
}

/// Check that a declared parameter schema belongs to a configured trigger.
pub fn parameters_in_use<S: State, T: Trigger>(
    graph: &StateGraph<S, T>,
    trigger: &T,
    _schema: &ParameterSchema,
) -> AuditCheck<S, T> {
    if graph.nodes().any(|node| node.configures(trigger)) {
        Validation::success(())
    } else {
        Validation::fail(ConfigurationIssue::UnusedParameters {
            trigger: trigger.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArgumentType, Guard};
    use crate::machine::{StateMachine, TriggerBehavior};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestTrigger {
        Start,
        Finish,
    }

    fn node_checks(
        machine: &StateMachine<TestState, TestTrigger>,
        state: TestState,
    ) -> Vec<AuditCheck<TestState, TestTrigger>> {
        let graph = machine.graph();
        guard_overlaps(graph.node(graph.find(&state).unwrap()))
    }

    #[test]
    fn disjoint_guards_pass() {
        let mut machine = StateMachine::new(TestState::Initial);
        machine
            .configure(TestState::Initial)
            .permit_if(TestTrigger::Start, TestState::Processing, || true)
            .unwrap()
            .permit_if(TestTrigger::Start, TestState::Complete, || false)
            .unwrap();

        let checks = node_checks(&machine, TestState::Initial);
        assert!(checks.iter().all(|c| c.is_success()));
    }

    #[test]
    fn two_unguarded_behaviors_are_guaranteed_ambiguity() {
        let mut machine = StateMachine::new(TestState::Initial);
        machine
            .configure(TestState::Initial)
            .permit(TestTrigger::Start, TestState::Processing)
            .unwrap()
            .ignore(TestTrigger::Start);

        let checks = node_checks(&machine, TestState::Initial);
        assert_eq!(checks.len(), 1);
        match &checks[0] {
            Validation::Failure(issues) => {
                assert!(issues.iter().any(|i| matches!(
                    i,
                    ConfigurationIssue::GuaranteedAmbiguity { count: 2, .. }
                )));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn unguarded_next_to_guarded_is_overlap() {
        let mut machine = StateMachine::new(TestState::Initial);
        machine.configure(TestState::Initial).behavior(TriggerBehavior::transitioning(
            TestTrigger::Finish,
            TestState::Complete,
            Guard::always(),
        ));
        machine
            .configure(TestState::Initial)
            .ignore_if(TestTrigger::Finish, || false);

        let checks = node_checks(&machine, TestState::Initial);
        assert!(checks[0].is_failure());
    }

    #[test]
    fn declared_but_unconfigured_parameters_are_reported() {
        let machine: StateMachine<TestState, TestTrigger> = StateMachine::new(TestState::Initial);
        let schema = ParameterSchema::new(vec![ArgumentType::of::<u32>()]);

        let check = parameters_in_use(machine.graph(), &TestTrigger::Finish, &schema);
        assert!(check.is_failure());
    }
}
