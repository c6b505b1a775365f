//! Phone Call State Machine
//!
//! This example demonstrates a hierarchical state machine.
//!
//! Key concepts:
//! - Substates inheriting their superstate's triggers
//! - Entry and exit actions run outermost-first / innermost-first
//! - Reentry and ignored triggers
//! - Inspecting permitted triggers
//!
//! Run with: cargo run --example phone_call

use std::cell::Cell;
use std::rc::Rc;
use substate::machine::StateMachine;
use substate::state_enum;

state_enum! {
    enum Call {
        OffHook,
        Ringing,
        Connected,
        OnHold,
        PhoneDestroyed,
    }
}

state_enum! {
    enum Event {
        CallDialed,
        CallConnected,
        LeftMessage,
        PlacedOnHold,
        TakenOffHold,
        PhoneHurledAgainstWall,
        HungUp,
        MuteToggled,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Phone Call State Machine ===\n");

    let volume = Rc::new(Cell::new(5_u8));
    let mut phone = StateMachine::new(Call::OffHook);

    phone
        .configure(Call::OffHook)
        .permit(Event::CallDialed, Call::Ringing)?;

    phone
        .configure(Call::Ringing)
        .permit(Event::HungUp, Call::OffHook)?
        .permit(Event::CallConnected, Call::Connected)?;

    let timer_volume = Rc::clone(&volume);
    phone
        .configure(Call::Connected)
        .on_entry(|t| println!("  [Connected] timer started (via {})", t.trigger()))
        .on_exit(move |_| {
            println!("  [Connected] timer stopped at volume {}", timer_volume.get())
        })
        .permit(Event::LeftMessage, Call::OffHook)?
        .permit(Event::HungUp, Call::OffHook)?
        .permit(Event::PlacedOnHold, Call::OnHold)?
        .permit_reentry(Event::MuteToggled);

    phone
        .configure(Call::OnHold)
        .substate_of(Call::Connected)?
        .on_entry(|_| println!("  [OnHold] playing hold music"))
        .on_exit(|_| println!("  [OnHold] music stopped"))
        .permit(Event::TakenOffHold, Call::Connected)?
        .permit(Event::PhoneHurledAgainstWall, Call::PhoneDestroyed)?
        .ignore(Event::MuteToggled);

    let script = [
        Event::CallDialed,
        Event::CallConnected,
        Event::MuteToggled,
        Event::PlacedOnHold,
        Event::MuteToggled,
        Event::TakenOffHold,
        Event::PlacedOnHold,
        Event::HungUp,
    ];

    for event in script {
        println!("{} --{}-->", phone.state(), event);
        let fired = phone.fire(event)?;
        if fired.is_ignored() {
            println!("  (ignored)");
        }
        println!("  now in {}", phone.state());

        let mut permitted: Vec<String> = phone
            .permitted_triggers()
            .into_iter()
            .map(|t| t.to_string())
            .collect();
        permitted.sort();
        println!("  permitted: {}\n", permitted.join(", "));
    }

    println!("Key Characteristics:");
    println!("- OnHold inherits HungUp from Connected");
    println!("- Leaving OnHold for OffHook exits OnHold, then Connected");
    println!("- MuteToggled re-enters Connected but is ignored while on hold");

    println!("\n=== Example Complete ===");
    Ok(())
}
