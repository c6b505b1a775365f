//! The engine: state nodes, hierarchical traversal and trigger firing.
//!
//! Firing flows one way:
//!
//! ```text
//! StateMachine::fire
//!   -> StateGraph::resolve      (current node, then superstates)
//!   -> TriggerBehavior::destination
//!   -> Transition
//!   -> StateGraph::exit          (source node, innermost first)
//!   -> StateGraph::enter         (destination node, outermost first)
//! ```

mod behavior;
mod engine;
mod error;
mod graph;
mod node;

pub use behavior::{BehaviorKind, DestinationSelector, TriggerBehavior};
pub use engine::{Fired, StateMachine};
pub use error::{ActionError, FireError};
pub use graph::StateGraph;
pub use node::{EntryAction, ExitAction, NodeId, StateNode};
