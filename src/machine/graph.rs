//! Arena of state nodes and the hierarchical algorithms over it.
//!
//! Nodes are created lazily the first time a state is configured and live as
//! long as the graph. Superstate and substate links are [`NodeId`]s into the
//! arena, so the hierarchy is a forest by construction: a node gets at most
//! one superstate and a link that would close a cycle is rejected.

use crate::builder::ConfigurationError;
use crate::core::{describe, Argument, State, Transition, Trigger};
use crate::machine::behavior::TriggerBehavior;
use crate::machine::error::FireError;
use crate::machine::node::{LocalMatch, NodeId, StateNode};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Registry of every configured state.
pub struct StateGraph<S, T> {
    nodes: Vec<StateNode<S, T>>,
    index: HashMap<S, NodeId>,
}

impl<S: State, T: Trigger> Default for StateGraph<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> StateGraph<S, T> {
    pub fn nodes(&self) -> impl Iterator<Item = &StateNode<S, T>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: State, T: Trigger> StateGraph<S, T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The node for `state`, if it has been configured.
    pub fn find(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    pub(crate) fn get_or_insert(&mut self, state: S) -> NodeId {
        if let Some(id) = self.find(&state) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(StateNode::new(state.clone()));
        self.index.insert(state, id);
        id
    }

    pub fn node(&self, id: NodeId) -> &StateNode<S, T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut StateNode<S, T> {
        &mut self.nodes[id.0]
    }

    /// Make `parent` the superstate of `child` and record the inverse link.
    ///
    /// Repeating an existing link is a no-op. Re-parenting and links that
    /// would put a node inside its own subtree are rejected.
    pub(crate) fn set_superstate(
        &mut self,
        child: NodeId,
        parent: NodeId,
    ) -> Result<(), ConfigurationError> {
        let child_state = self.node(child).state();

        if let Some(existing) = self.node(child).superstate() {
            if existing == parent {
                return Ok(());
            }
            return Err(ConfigurationError::SuperstateAlreadySet {
                state: describe(child_state),
                existing: describe(self.node(existing).state()),
                requested: describe(self.node(parent).state()),
            });
        }

        if self.is_included_in(parent, child_state) {
            return Err(ConfigurationError::CyclicHierarchy {
                state: describe(child_state),
                superstate: describe(self.node(parent).state()),
            });
        }

        trace!(
            state = ?child_state,
            superstate = ?self.node(parent).state(),
            "linking substate"
        );
        self.node_mut(child).superstate = Some(parent);
        self.node_mut(parent).substates.push(child);
        Ok(())
    }

    /// True if the node's state is `state` or any descendant's is.
    pub fn includes(&self, id: NodeId, state: &S) -> bool {
        let node = self.node(id);
        node.state() == state
            || node
                .substates()
                .iter()
                .any(|&child| self.includes(child, state))
    }

    /// True if the node's state is `state` or any ancestor's is.
    pub fn is_included_in(&self, id: NodeId, state: &S) -> bool {
        let node = self.node(id);
        node.state() == state
            || node
                .superstate()
                .is_some_and(|parent| self.is_included_in(parent, state))
    }

    /// Find the single active behavior for `trigger`, searching from `id` up
    /// through its superstates.
    ///
    /// A node whose behaviors for the trigger are all guarded out is passed
    /// over like a node without the trigger. More than one active behavior on
    /// a node is an error and stops the search.
    pub fn resolve(&self, id: NodeId, trigger: &T) -> Result<&TriggerBehavior<S, T>, FireError> {
        let mut guarded_out = false;
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            let node = self.node(current);
            match node.local_match(trigger) {
                LocalMatch::Found(behavior) => return Ok(behavior),
                LocalMatch::Ambiguous => {
                    return Err(FireError::AmbiguousGuards {
                        trigger: describe(trigger),
                        state: describe(node.state()),
                    })
                }
                LocalMatch::GuardedOut => guarded_out = true,
                LocalMatch::NotConfigured => {}
            }
            cursor = node.superstate();
        }

        let trigger = describe(trigger);
        let state = describe(self.node(id).state());
        Err(if guarded_out {
            FireError::GuardsUnsatisfied { trigger, state }
        } else {
            FireError::Unhandled { trigger, state }
        })
    }

    pub fn can_handle(&self, id: NodeId, trigger: &T) -> bool {
        self.resolve(id, trigger).is_ok()
    }

    /// Triggers with a currently active behavior on the node or any ancestor.
    pub fn permitted_triggers(&self, id: NodeId) -> HashSet<T> {
        let mut permitted = HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            permitted.extend(node.locally_permitted().cloned());
            cursor = node.superstate();
        }
        permitted
    }

    /// Run exit actions for leaving the node, innermost first.
    ///
    /// Stops at the first ancestor whose subtree contains the destination.
    /// A reentry runs only this node's own actions.
    pub fn exit(&self, id: NodeId, transition: &Transition<S, T>) -> Result<(), FireError> {
        let node = self.node(id);
        if transition.is_reentry() {
            trace!(state = ?node.state(), "exiting (reentry)");
            node.execute_exit_actions(transition)
        } else if !self.includes(id, transition.destination()) {
            trace!(state = ?node.state(), "exiting");
            node.execute_exit_actions(transition)?;
            match node.superstate() {
                Some(parent) => self.exit(parent, transition),
                None => Ok(()),
            }
        } else {
            Ok(())
        }
    }

    /// Run entry actions for arriving at the node, outermost first.
    ///
    /// Ancestors already containing the source are not re-entered. A
    /// reentry runs only this node's own actions.
    pub fn enter(
        &self,
        id: NodeId,
        transition: &Transition<S, T>,
        args: &[Argument],
    ) -> Result<(), FireError> {
        let node = self.node(id);
        if transition.is_reentry() {
            trace!(state = ?node.state(), "entering (reentry)");
            node.execute_entry_actions(transition, args)
        } else if !self.includes(id, transition.source()) {
            if let Some(parent) = node.superstate() {
                self.enter(parent, transition, args)?;
            }
            trace!(state = ?node.state(), "entering");
            node.execute_entry_actions(transition, args)
        } else {
            Ok(())
        }
    }
}
