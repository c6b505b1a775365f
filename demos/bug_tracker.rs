//! Bug Tracker State Machine
//!
//! This example demonstrates parameterized triggers and guards.
//!
//! Key concepts:
//! - Typed trigger arguments validated before firing
//! - Entry actions that receive the typed arguments
//! - Guards closing over shared state
//! - Dynamic destinations chosen at fire time
//! - Auditing a configuration for overlapping guards
//!
//! Run with: cargo run --example bug_tracker

use std::cell::RefCell;
use std::rc::Rc;
use stillwater::validation::Validation;
use substate::machine::StateMachine;
use substate::{args, state_enum};

state_enum! {
    enum Bug {
        Open,
        Assigned,
        Deferred,
        Resolved,
        Closed,
    }
}

state_enum! {
    enum Action {
        Assign,
        Defer,
        Resolve,
        Close,
        Triage,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bug Tracker State Machine ===\n");

    let assignee: Rc<RefCell<Option<String>>> = Rc::default();
    let mut bug = StateMachine::new(Bug::Open);

    let assign = bug.set_trigger_parameters::<(String,)>(Action::Assign)?;
    let triage = bug.set_trigger_parameters::<(u8,)>(Action::Triage)?;

    bug.configure(Bug::Open)
        .permit(Action::Assign, Bug::Assigned)?
        .permit_dynamic_with(&triage, |(severity,)| {
            if severity >= 3 {
                Bug::Assigned
            } else {
                Bug::Deferred
            }
        });

    let owner = Rc::clone(&assignee);
    let has_owner = Rc::clone(&assignee);
    bug.configure(Bug::Assigned)
        .substate_of(Bug::Open)?
        .permit_reentry(Action::Assign)
        .permit(Action::Defer, Bug::Deferred)?
        .permit_if(Action::Resolve, Bug::Resolved, move || {
            has_owner.borrow().is_some()
        })?
        .on_entry_from_with(&assign, move |(name,), _| {
            println!("  assigned to {name}");
            *owner.borrow_mut() = Some(name);
        });

    let cleared = Rc::clone(&assignee);
    bug.configure(Bug::Deferred)
        .on_entry(move |_| *cleared.borrow_mut() = None)
        .permit(Action::Assign, Bug::Assigned)?;

    bug.configure(Bug::Resolved)
        .permit(Action::Close, Bug::Closed)?;

    match bug.audit() {
        Validation::Success(()) => println!("Configuration audit: clean\n"),
        Validation::Failure(issues) => {
            for issue in issues.iter() {
                println!("Configuration issue: {issue}");
            }
        }
    }

    println!("{} --Triage(1)-->", bug.state());
    bug.fire_with(&triage, (1,))?;
    println!("  now {}\n", bug.state());

    println!("{} --Assign(\"ada\")-->", bug.state());
    bug.fire_with(&assign, ("ada".to_string(),))?;
    println!("  now {}\n", bug.state());

    println!("{} --Assign(42)-->", bug.state());
    match bug.fire_with_args(Action::Assign, args![42_u32]) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(err) => println!("  rejected: {err}"),
    }
    println!("  still {}\n", bug.state());

    println!("{} --Assign(\"grace\")-->", bug.state());
    bug.fire_with(&assign, ("grace".to_string(),))?;
    println!("  now {}\n", bug.state());

    for action in [Action::Resolve, Action::Close] {
        println!("{} --{}-->", bug.state(), action);
        bug.fire(action)?;
        println!("  now {}\n", bug.state());
    }

    println!("Closed bug accepts further triggers: {}", bug.can_fire(&Action::Assign));

    println!("\n=== Example Complete ===");
    Ok(())
}
