//! Property-based tests for resolution, traversal and argument validation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated configurations.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use substate::core::{validate, Argument, ArgumentType, Guard, ParameterError, Transition};
use substate::machine::{FireError, StateMachine};

/// One permit declaration: (source, trigger, destination, guard result).
type Permit = (u8, u8, u8, bool);

prop_compose! {
    fn arbitrary_permit()(
        source in 0..5u8,
        trigger in 0..4u8,
        destination in 0..6u8,
        open in any::<bool>()
    ) -> Permit {
        (source, trigger, destination, open)
    }
}

fn build_machine(permits: &[Permit], initial: u8) -> StateMachine<u8, u8> {
    let mut machine = StateMachine::new(initial);
    for &(source, trigger, destination, open) in permits {
        let config = machine.configure(source);
        if source == destination {
            config.permit_reentry_if(trigger, move || open);
        } else {
            config
                .permit_if(trigger, destination, move || open)
                .expect("distinct states");
        }
    }
    machine
}

proptest! {
    #[test]
    fn guard_is_deterministic(open in any::<bool>()) {
        let guard = Guard::new(move || open);
        prop_assert_eq!(guard.check(), guard.check());
        prop_assert_eq!(guard.check(), open);
    }

    #[test]
    fn transition_is_reentry_iff_endpoints_match(source in 0..8u8, destination in 0..8u8) {
        let transition = Transition::new(source, destination, ());
        prop_assert_eq!(transition.is_reentry(), source == destination);
    }

    #[test]
    fn matching_arguments_always_validate(values in prop::collection::vec(any::<i32>(), 0..6)) {
        let expected = vec![ArgumentType::of::<i32>(); values.len()];
        let args: Vec<Argument> = values.into_iter().map(Argument::new).collect();
        prop_assert!(validate(&args, &expected).is_ok());
    }

    #[test]
    fn argument_count_mismatch_is_reported(actual in 0..6usize, slots in 0..6usize) {
        let expected = vec![ArgumentType::of::<i32>(); slots];
        let args: Vec<Argument> = (0..actual).map(|n| Argument::new(n as i32)).collect();
        let result = validate(&args, &expected);

        if actual > slots {
            prop_assert_eq!(
                result,
                Err(ParameterError::TooManyArguments { expected: slots, actual })
            );
        } else if actual < slots {
            let is_missing_at_first_gap = matches!(
                result,
                Err(ParameterError::MissingArgument { index, .. }) if index == actual
            );
            prop_assert!(is_missing_at_first_gap);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn nulls_are_accepted_in_any_slot(nulls in prop::collection::vec(any::<bool>(), 1..6)) {
        let expected = vec![ArgumentType::of::<String>(); nulls.len()];
        let args: Vec<Argument> = nulls
            .iter()
            .map(|&null| if null { Argument::null() } else { Argument::new(String::new()) })
            .collect();
        prop_assert!(validate(&args, &expected).is_ok());
    }

    #[test]
    fn permitted_triggers_is_idempotent(
        permits in prop::collection::vec(arbitrary_permit(), 0..12),
        initial in 0..5u8
    ) {
        let machine = build_machine(&permits, initial);
        prop_assert_eq!(machine.permitted_triggers(), machine.permitted_triggers());
    }

    #[test]
    fn firable_triggers_are_permitted(
        permits in prop::collection::vec(arbitrary_permit(), 0..12),
        initial in 0..5u8
    ) {
        let machine = build_machine(&permits, initial);
        let permitted = machine.permitted_triggers();
        for trigger in 0..4u8 {
            if machine.can_fire(&trigger) {
                prop_assert!(permitted.contains(&trigger));
            }
        }
    }

    #[test]
    fn fire_moves_to_destination_or_leaves_state(
        permits in prop::collection::vec(arbitrary_permit(), 0..12),
        triggers in prop::collection::vec(0..4u8, 1..10)
    ) {
        let mut machine = build_machine(&permits, 0);

        for trigger in triggers {
            let before = *machine.state();
            let could_fire = machine.can_fire(&trigger);

            match machine.fire(trigger) {
                Ok(fired) => {
                    prop_assert!(could_fire);
                    let transition = fired.transition().expect("no ignores configured");
                    prop_assert_eq!(transition.source(), &before);
                    prop_assert_eq!(machine.state(), transition.destination());
                }
                Err(FireError::Unhandled { .. })
                | Err(FireError::GuardsUnsatisfied { .. })
                | Err(FireError::AmbiguousGuards { .. }) => {
                    prop_assert!(!could_fire);
                    prop_assert_eq!(machine.state(), &before);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn nested_entry_and_exit_mirror_each_other(depth in 1..6u8) {
        let outside = 100u8;
        let log: Rc<RefCell<Vec<(char, u8)>>> = Rc::default();
        let mut machine = StateMachine::new(outside);

        machine.configure(outside).permit(0u8, 0).unwrap();
        machine.configure(0).permit(1u8, outside).unwrap();
        for level in 0..depth {
            let entry = Rc::clone(&log);
            let exit = Rc::clone(&log);
            let config = machine
                .configure(level)
                .on_entry(move |_| entry.borrow_mut().push(('+', level)))
                .on_exit(move |_| exit.borrow_mut().push(('-', level)));
            if level + 1 < depth {
                config.substate_of(level + 1).unwrap();
            }
        }

        machine.fire(0).unwrap();
        let entered: Vec<u8> = log.borrow().iter().map(|&(_, level)| level).collect();
        let expected: Vec<u8> = (0..depth).rev().collect();
        prop_assert_eq!(entered, expected);

        log.borrow_mut().clear();
        machine.fire(1).unwrap();
        let exited: Vec<u8> = log.borrow().iter().map(|&(_, level)| level).collect();
        let expected: Vec<u8> = (0..depth).collect();
        prop_assert_eq!(exited, expected);
        prop_assert!(log.borrow().iter().all(|&(kind, _)| kind == '-'));
    }
}
