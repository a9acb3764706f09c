//! Arena storage for forest nodes
//!
//! Every node of every [`Forest`](crate::forest::Forest) lives in a
//! [`NodeArena`], a `slotmap`-backed store addressed by generational
//! [`NodeRef`] handles. A forest is only a view over the arena: it stores
//! handles to its minimum and to one root-ring member, never the nodes
//! themselves. This lets two forests sharing an arena meld by relinking a few
//! handles, with no node moving between containers.
//!
//! # Handles
//!
//! - Handles are `Copy` and compared by value, so "is this the same node" is
//!   plain `==`.
//! - Removing a node invalidates its handle. A later lookup returns `None`
//!   instead of aliasing whatever reuses the slot.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_forest::arena::NodeArena;
//!
//! let mut arena = NodeArena::new();
//! let node = arena.alloc(7);
//! assert_eq!(arena.key(node), Some(7));
//!
//! // A raw node is a singleton ring with no relatives.
//! let n = arena.get(node).unwrap();
//! assert_eq!(n.next(), node);
//! assert_eq!(n.parent(), None);
//! ```

use crate::rank::Rank;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a node stored in a [`NodeArena`]
    pub struct NodeRef;
}

/// A single forest element
///
/// `next`/`prev` always point at a valid ring member (the node itself when it
/// is alone). `child` points at an arbitrary member of the child ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) key: i64,
    pub(crate) rank: Rank,
    pub(crate) mark: bool,
    pub(crate) child: Option<NodeRef>,
    pub(crate) parent: Option<NodeRef>,
    pub(crate) next: NodeRef,
    pub(crate) prev: NodeRef,
}

impl Node {
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Number of direct children.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// True if this node lost a child since it last became a child itself.
    pub fn is_marked(&self) -> bool {
        self.mark
    }

    pub fn child(&self) -> Option<NodeRef> {
        self.child
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
    }

    pub fn next(&self) -> NodeRef {
        self.next
    }

    pub fn prev(&self) -> NodeRef {
        self.prev
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owner of all nodes of one or more forests
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: SlotMap<NodeRef, Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocates a detached singleton node: rank 0, unmarked, no parent or
    /// child, linked only to itself.
    ///
    /// The node belongs to no forest until it is inserted through
    /// [`Forest::from_raw_parts`](crate::forest::Forest::from_raw_parts) or
    /// ring surgery.
    pub fn alloc(&mut self, key: i64) -> NodeRef {
        self.nodes.insert_with_key(|me| Node {
            key,
            rank: 0,
            mark: false,
            child: None,
            parent: None,
            next: me,
            prev: me,
        })
    }

    pub fn get(&self, node: NodeRef) -> Option<&Node> {
        self.nodes.get(node)
    }

    pub fn key(&self, node: NodeRef) -> Option<i64> {
        self.nodes.get(node).map(|n| n.key)
    }

    pub fn contains(&self, node: NodeRef) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of live nodes across every forest using this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get_mut(&mut self, node: NodeRef) -> Option<&mut Node> {
        self.nodes.get_mut(node)
    }

    pub(crate) fn remove(&mut self, node: NodeRef) -> Option<Node> {
        self.nodes.remove(node)
    }

    // Structural accessors for handles the forest already knows are live.
    // A miss means the forest graph references a freed node, which only
    // happens after a precondition violation such as deleting a foreign node.

    #[inline]
    pub(crate) fn node(&self, node: NodeRef) -> &Node {
        &self.nodes[node]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, node: NodeRef) -> &mut Node {
        &mut self.nodes[node]
    }
}
