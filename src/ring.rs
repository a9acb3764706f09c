//! Circular doubly-linked sibling rings over arena handles
//!
//! Every node is a member of exactly one ring: either the root ring of its
//! forest or the child ring of its parent. A ring has no head or tail. Any
//! member can serve as the entry point, and a lone node links to itself.
//!
//! All structural surgery in the forest goes through these primitives:
//!
//! | Operation        | Cost      |
//! |------------------|-----------|
//! | `make_singleton` | O(1)      |
//! | `splice`         | O(1)      |
//! | `unlink`         | O(1)      |
//! | `iter` / `len`   | O(ring)   |
//!
//! # Example
//!
//! ```rust
//! use fibonacci_forest::arena::NodeArena;
//! use fibonacci_forest::ring;
//!
//! let mut arena = NodeArena::new();
//! let a = arena.alloc(1);
//! let b = arena.alloc(2);
//!
//! // `b`'s ring comes first when walking from the returned anchor
//! let start = ring::splice(&mut arena, a, b);
//! assert_eq!(start, b);
//! let keys: Vec<i64> = ring::iter(&arena, start).map(|n| arena.key(n).unwrap()).collect();
//! assert_eq!(keys, vec![2, 1]);
//! ```

use crate::arena::{NodeArena, NodeRef};

/// Makes `x` a ring of one.
///
/// Any ring `x` used to belong to is left untouched, so callers detach `x`
/// first unless they are rebuilding that ring from scratch.
pub fn make_singleton(arena: &mut NodeArena, x: NodeRef) {
    let node = arena.node_mut(x);
    node.next = x;
    node.prev = x;
}

/// Concatenates two disjoint rings and returns `b` as the new anchor.
///
/// Walking forward from the result visits all of `b`'s ring, then all of
/// `a`'s ring:
///
/// ```text
/// before:  a -> .. -> a_last -> a      b -> .. -> b_last -> b
/// after:   b -> .. -> b_last -> a -> .. -> a_last -> b
/// ```
pub fn splice(arena: &mut NodeArena, a: NodeRef, b: NodeRef) -> NodeRef {
    let a_last = arena.node(a).prev;
    let b_last = arena.node(b).prev;

    arena.node_mut(b_last).next = a;
    arena.node_mut(a).prev = b_last;
    arena.node_mut(a_last).next = b;
    arena.node_mut(b).prev = a_last;

    b
}

/// Joins two optional rings, anchored at `b` when both exist.
pub fn splice_opt(
    arena: &mut NodeArena,
    a: Option<NodeRef>,
    b: Option<NodeRef>,
) -> Option<NodeRef> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(a), Some(b)) => Some(splice(arena, a, b)),
    }
}

/// Removes `x` from its ring, leaving it as a singleton.
///
/// Returns the member that followed `x`, or `None` if `x` was alone.
pub fn unlink(arena: &mut NodeArena, x: NodeRef) -> Option<NodeRef> {
    let (next, prev) = {
        let node = arena.node(x);
        (node.next, node.prev)
    };
    if next == x {
        return None;
    }

    arena.node_mut(prev).next = next;
    arena.node_mut(next).prev = prev;
    make_singleton(arena, x);
    Some(next)
}

/// Read-only forward walk over a ring
///
/// Yields `start` first and stops right before `start` would be revisited.
/// A clone continues from the same position; call [`iter`] again to restart.
#[derive(Debug, Clone)]
pub struct RingIter<'a> {
    arena: &'a NodeArena,
    start: NodeRef,
    next: Option<NodeRef>,
}

impl Iterator for RingIter<'_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let current = self.next?;
        let following = self.arena.get(current)?.next;
        self.next = (following != self.start).then_some(following);
        Some(current)
    }
}

/// Walks the ring containing `start`, beginning at `start`.
pub fn iter(arena: &NodeArena, start: NodeRef) -> RingIter<'_> {
    RingIter {
        arena,
        start,
        next: arena.contains(start).then_some(start),
    }
}

/// Walks an optional ring; `None` yields nothing.
pub fn iter_opt(arena: &NodeArena, start: Option<NodeRef>) -> RingIter<'_> {
    match start {
        Some(start) => iter(arena, start),
        None => RingIter {
            arena,
            start: NodeRef::default(),
            next: None,
        },
    }
}

/// Counts the members of the ring containing `start`.
///
/// This is O(n) - use sparingly.
pub fn len(arena: &NodeArena, start: NodeRef) -> usize {
    iter(arena, start).count()
}
