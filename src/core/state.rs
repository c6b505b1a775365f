//! Marker traits for state and trigger identities.
//!
//! The machine never interprets states or triggers. They are opaque values
//! used as lookup keys and comparison targets, so any type with total
//! equality, hashing and a debug rendering qualifies.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// Implemented automatically for every type that is `Clone + Eq + Hash +
/// Debug + 'static`. Enums, integers and strings all work.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transitions and the current-state slot
/// - `Eq` + `Hash`: states key the node registry
/// - `Debug`: states are rendered in errors and log events
///
/// # Example
///
/// ```rust
/// use substate::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&TaskState::Pending);
/// assert_state(&42_u32);
/// assert_state(&String::from("idle"));
/// ```
pub trait State: Clone + Eq + Hash + Debug + 'static {}

impl<S> State for S where S: Clone + Eq + Hash + Debug + 'static {}

/// Trait for trigger values.
///
/// Has the same requirements as [`State`]; the two are kept apart so
/// signatures read clearly.
pub trait Trigger: Clone + Eq + Hash + Debug + 'static {}

impl<T> Trigger for T where T: Clone + Eq + Hash + Debug + 'static {}

/// Render a state or trigger for error messages.
pub(crate) fn describe<V: Debug>(value: &V) -> String {
    format!("{value:?}")
}
