//! Value types shared by the whole crate.
//!
//! - `State` / `Trigger` marker traits for caller-supplied identities
//! - `Guard` predicates evaluated at fire time
//! - `Transition` records
//! - the argument model used by parameterized triggers

mod guard;
mod parameters;
mod state;
mod transition;

pub use guard::Guard;
pub use parameters::{
    validate, Argument, ArgumentType, ParameterError, ParameterSchema, ParameterizedTrigger,
    Parameters,
};
pub use state::{State, Trigger};
pub use transition::Transition;

pub(crate) use state::describe;
