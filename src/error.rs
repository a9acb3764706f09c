//! Structural invariant violations reported by [`Forest::validate`]
//!
//! Forest operations themselves never fail: invalid arguments are either
//! defined no-ops or caller precondition violations. This error type is only
//! produced when walking a forest to check that its node graph and cached
//! counters are consistent.
//!
//! [`Forest::validate`]: crate::forest::Forest::validate

use crate::arena::NodeRef;
use std::fmt;

/// A broken forest invariant, naming the node or counter where it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestError {
    /// `node.next.prev != node`
    BrokenRing(NodeRef),
    /// A child ring member whose `parent` is not the ring's owner
    BrokenParentLink(NodeRef),
    /// A child whose key is smaller than its parent's
    HeapOrderViolated(NodeRef),
    /// A node whose rank differs from its child ring length
    WrongRank { node: NodeRef, rank: usize, children: usize },
    /// A root-ring member that still has a parent
    RootHasParent(NodeRef),
    /// A root whose mark is set
    MarkedRoot(NodeRef),
    /// A link to a node no longer in the arena
    StaleHandle(NodeRef),
    /// The cached minimum is absent, not a root, or not the smallest root
    MinMismatch,
    WrongSize { expected: usize, actual: usize },
    WrongTreeCount { expected: usize, actual: usize },
    WrongMarkedCount { expected: usize, actual: usize },
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::BrokenRing(node) => {
                write!(f, "ring link of {node:?} is not doubly consistent")
            }
            ForestError::BrokenParentLink(node) => {
                write!(f, "{node:?} does not point back to the parent owning its ring")
            }
            ForestError::HeapOrderViolated(node) => {
                write!(f, "{node:?} has a smaller key than its parent")
            }
            ForestError::WrongRank { node, rank, children } => {
                write!(f, "{node:?} has rank {rank} but {children} children")
            }
            ForestError::RootHasParent(node) => {
                write!(f, "root {node:?} has a parent link")
            }
            ForestError::MarkedRoot(node) => write!(f, "root {node:?} is marked"),
            ForestError::StaleHandle(node) => {
                write!(f, "{node:?} is referenced but no longer stored in the arena")
            }
            ForestError::MinMismatch => {
                write!(f, "cached minimum is not the smallest root")
            }
            ForestError::WrongSize { expected, actual } => {
                write!(f, "size counter is {expected} but {actual} nodes are reachable")
            }
            ForestError::WrongTreeCount { expected, actual } => {
                write!(f, "tree counter is {expected} but the root ring has {actual} members")
            }
            ForestError::WrongMarkedCount { expected, actual } => {
                write!(f, "marked counter is {expected} but {actual} nodes are marked")
            }
        }
    }
}

impl std::error::Error for ForestError {}
