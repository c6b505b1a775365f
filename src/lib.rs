//! Substate: a hierarchical finite state machine library
//!
//! A machine holds a current state and the configuration of every state it
//! knows about. Firing a trigger looks the trigger up in the current state,
//! then in each enclosing superstate, picks the single behavior whose guard
//! passes, and runs exit and entry actions along the path between source and
//! destination.
//!
//! # Core Concepts
//!
//! - **States and triggers**: any `Clone + Eq + Hash + Debug` value
//! - **Behaviors**: permit, reentry, ignore and dynamic permits, each
//!   optionally guarded
//! - **Hierarchy**: substates inherit their superstate's triggers, and
//!   entry/exit actions respect nesting
//! - **Parameterized triggers**: typed arguments validated before firing
//! - **Audit**: configuration problems reported all at once via Stillwater
//!   validation
//!
//! # Example
//!
//! ```rust
//! use substate::machine::StateMachine;
//! use substate::state_enum;
//!
//! state_enum! {
//!     enum Call {
//!         OffHook,
//!         Ringing,
//!         Connected,
//!         OnHold,
//!     }
//! }
//!
//! state_enum! {
//!     enum Event {
//!         CallDialed,
//!         CallConnected,
//!         PlacedOnHold,
//!         TakenOffHold,
//!         HungUp,
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut phone = StateMachine::new(Call::OffHook);
//!
//! phone.configure(Call::OffHook).permit(Event::CallDialed, Call::Ringing)?;
//! phone.configure(Call::Ringing).permit(Event::CallConnected, Call::Connected)?;
//! phone
//!     .configure(Call::Connected)
//!     .permit(Event::PlacedOnHold, Call::OnHold)?
//!     .permit(Event::HungUp, Call::OffHook)?;
//! phone
//!     .configure(Call::OnHold)
//!     .substate_of(Call::Connected)?
//!     .permit(Event::TakenOffHold, Call::Connected)?;
//!
//! phone.fire(Event::CallDialed)?;
//! phone.fire(Event::CallConnected)?;
//! phone.fire(Event::PlacedOnHold)?;
//!
//! assert!(phone.is_in_state(&Call::Connected));
//! assert!(phone.can_fire(&Event::HungUp));
//!
//! phone.fire(Event::HungUp)?;
//! assert_eq!(phone.state(), &Call::OffHook);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::audit::ConfigurationIssue;
pub use crate::builder::{ConfigurationError, StateConfiguration};
pub use crate::core::{
    Argument, ArgumentType, Guard, ParameterError, ParameterSchema, ParameterizedTrigger, State,
    Transition, Trigger,
};
pub use crate::machine::{ActionError, FireError, Fired, StateMachine};
