//! Fibonacci forest over `i64` keys
//!
//! A Fibonacci forest is a priority queue with:
//! - O(1) amortized insert and decrease_key
//! - O(1) meld
//! - O(log n) amortized delete_min and delete
//!
//! The structure is a collection of heap-ordered trees whose roots form a
//! circular doubly-linked ring. Roots are only merged lazily, by
//! [`Forest::consolidate`] after a minimum is removed, and decrease_key cuts
//! violating subtrees to the root ring with cascading cuts through marked
//! ancestors.
//!
//! Nodes live in a [`NodeArena`] passed to every operation. The forest stores
//! handles and counters only, so several forests can share one arena and meld
//! in O(1).
//!
//! # Example
//!
//! ```rust
//! use fibonacci_forest::{Forest, NodeArena};
//!
//! let mut arena = NodeArena::new();
//! let mut forest = Forest::new();
//! let five = forest.insert(&mut arena, 5);
//! forest.insert(&mut arena, 3);
//! forest.insert(&mut arena, 8);
//!
//! forest.decrease_key(&mut arena, five, 4);
//! assert_eq!(forest.min_key(&arena), Some(1));
//!
//! assert_eq!(forest.delete_min(&mut arena), Some(1));
//! assert_eq!(forest.min_key(&arena), Some(3));
//! assert_eq!(forest.len(), 2);
//! ```

use crate::arena::{NodeArena, NodeRef};
use crate::counters;
use crate::rank::{self, checked_decrement, checked_increment};
use crate::ring::{self, RingIter};

/// A mergeable min-priority queue over `i64` keys
///
/// Dropping a forest does not release its nodes; they belong to the arena.
#[derive(Debug, Default)]
pub struct Forest {
    min: Option<NodeRef>,
    roots_start: Option<NodeRef>,
    tree_count: usize,
    size: usize,
    marked_count: usize,
    links: u64,
    cuts: u64,
}

impl Forest {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a forest from an existing node graph without any checks.
    ///
    /// Test scaffolding only: this reaches structural states (for example a
    /// long ring of singleton trees) without going through `insert`. The
    /// caller guarantees that the counters match the graph reachable from
    /// `roots_start` and that `min` is its smallest root. Use
    /// [`validate`](Self::validate) to confirm.
    #[doc(hidden)]
    pub fn from_raw_parts(
        min: Option<NodeRef>,
        roots_start: Option<NodeRef>,
        tree_count: usize,
        size: usize,
        marked_count: usize,
    ) -> Self {
        Self {
            min,
            roots_start,
            tree_count,
            size,
            marked_count,
            links: 0,
            cuts: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Number of trees in the root ring.
    pub fn tree_count(&self) -> usize {
        self.tree_count
    }

    /// Number of marked nodes.
    pub fn marked_count(&self) -> usize {
        self.marked_count
    }

    /// Number of nodes that are not marked.
    pub fn non_marked(&self) -> usize {
        self.size - self.marked_count
    }

    /// Amortized-analysis potential: `trees + 2 * marked`.
    pub fn potential(&self) -> usize {
        self.tree_count + 2 * self.marked_count
    }

    /// Links performed by this forest, including those of forests melded in.
    pub fn link_count(&self) -> u64 {
        self.links
    }

    /// Cuts performed by this forest, including those of forests melded in.
    pub fn cut_count(&self) -> u64 {
        self.cuts
    }

    /// The cached minimum root.
    pub fn min(&self) -> Option<NodeRef> {
        self.min
    }

    pub fn min_key(&self, arena: &NodeArena) -> Option<i64> {
        self.min.and_then(|m| arena.key(m))
    }

    /// An arbitrary member of the root ring, used as the traversal anchor.
    pub fn roots_start(&self) -> Option<NodeRef> {
        self.roots_start
    }

    /// Walks the root ring from its anchor.
    pub fn roots<'a>(&self, arena: &'a NodeArena) -> RingIter<'a> {
        ring::iter_opt(arena, self.roots_start)
    }

    /// Inserts `key` as a new singleton tree at the front of the root ring.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, arena: &mut NodeArena, key: i64) -> NodeRef {
        let node = arena.alloc(key);
        self.roots_start = ring::splice_opt(arena, self.roots_start, Some(node));

        if self.min.map_or(true, |m| key < arena.node(m).key) {
            self.min = Some(node);
        }

        self.size += 1;
        self.tree_count += 1;
        self.check_invariants(arena);
        node
    }

    /// Moves every tree of `other` into this forest.
    ///
    /// Both forests must use `arena`. `other`'s roots are placed in front of
    /// this forest's roots.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn meld(&mut self, arena: &mut NodeArena, other: Forest) {
        if other.is_empty() {
            return;
        }
        let Some(other_start) = other.roots_start else {
            return;
        };

        tracing::trace!(size = self.size, other_size = other.size, "melding forests");

        let adopt_other = match (self.min, other.min) {
            (None, _) => true,
            (Some(mine), Some(theirs)) => arena.node(theirs).key < arena.node(mine).key,
            (Some(_), None) => false,
        };
        if adopt_other {
            self.min = other.min;
        }

        self.roots_start = ring::splice_opt(arena, self.roots_start, Some(other_start));
        self.tree_count += other.tree_count;
        self.size += other.size;
        self.marked_count += other.marked_count;
        self.links += other.links;
        self.cuts += other.cuts;
        self.check_invariants(arena);
    }

    /// Scans the root ring for the smallest key.
    ///
    /// Ties resolve to the first root found walking from the anchor.
    ///
    /// # Time Complexity
    /// O(number of roots)
    pub fn find_min(&self, arena: &NodeArena) -> Option<NodeRef> {
        let mut best: Option<(NodeRef, i64)> = None;
        for root in self.roots(arena) {
            let key = arena.node(root).key;
            if best.map_or(true, |(_, k)| key < k) {
                best = Some((root, key));
            }
        }
        best.map(|(root, _)| root)
    }

    /// Removes the minimum and consolidates the root ring.
    ///
    /// Returns the removed key, or `None` if the forest is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete_min(&mut self, arena: &mut NodeArena) -> Option<i64> {
        let min = self.min?;
        let key = self.extract_root(arena, min);
        self.min = self.find_min(arena);
        self.consolidate(arena);
        self.check_invariants(arena);
        Some(key)
    }

    /// Links same-rank roots until every root has a distinct rank, then
    /// rebuilds the root ring in increasing rank order.
    ///
    /// The cached minimum is kept. If an equal-keyed root absorbed it, the
    /// minimum moves to a root with the same key.
    pub fn consolidate(&mut self, arena: &mut NodeArena) {
        let Some(start) = self.roots_start else {
            return;
        };

        let roots: Vec<NodeRef> = ring::iter(arena, start).collect();
        let mut buckets: Vec<Option<NodeRef>> = vec![None; rank::bucket_table_len(self.size)];
        let mut links = 0u64;

        for &root in &roots {
            let mut tree = root;
            loop {
                let r = arena.node(tree).rank as usize;
                if r >= buckets.len() {
                    buckets.resize(r + 1, None);
                }
                match buckets[r].take() {
                    None => {
                        buckets[r] = Some(tree);
                        break;
                    }
                    Some(occupant) => {
                        tree = Self::link(arena, occupant, tree);
                        links += 1;
                    }
                }
            }
        }

        let mut new_start: Option<NodeRef> = None;
        let mut trees = 0;
        for root in buckets.into_iter().flatten() {
            ring::make_singleton(arena, root);
            // Append so the ring reads in increasing rank order from the anchor
            new_start = Some(match new_start {
                None => root,
                Some(first) => ring::splice(arena, root, first),
            });
            trees += 1;
        }

        self.roots_start = new_start;
        self.tree_count = trees;
        if self.min.is_some_and(|m| arena.node(m).parent.is_some()) {
            self.min = self.find_min(arena);
        }

        self.links += links;
        counters::record_links(links);
        tracing::trace!(roots = roots.len(), links, trees, "consolidated root ring");
    }

    /// Decreases the key of `node` by `delta`, restoring heap order with
    /// cascading cuts.
    ///
    /// A negative `delta`, a stale handle, or an empty forest leaves the
    /// forest unchanged. The new key saturates at `i64::MIN`.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, arena: &mut NodeArena, node: NodeRef, delta: i64) {
        if delta < 0 || self.is_empty() {
            return;
        }
        let Some(key) = arena.key(node) else {
            return;
        };

        self.decrease_to(arena, node, key.saturating_sub(delta));
        self.check_invariants(arena);
    }

    /// Removes `node`, returning its key.
    ///
    /// `node` must belong to this forest; no containment check is made.
    /// Returns `None` for a stale handle or an empty forest.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, arena: &mut NodeArena, node: NodeRef) -> Option<i64> {
        let old_min = self.min?;
        let key = arena.key(node)?;
        if node == old_min {
            return self.delete_min(arena);
        }

        // Drop `node` strictly below the minimum (or onto it, when the
        // minimum already holds i64::MIN) so it is cut to the root ring.
        let old_min_key = arena.node(old_min).key;
        let forced = if old_min_key == i64::MIN {
            i64::MIN
        } else {
            old_min_key - 1
        };
        self.decrease_to(arena, node, forced);

        self.extract_root(arena, node);
        self.min = Some(old_min);
        self.consolidate(arena);
        self.check_invariants(arena);
        Some(key)
    }

    /// Number of roots per rank, without trailing zero ranks.
    ///
    /// For a consolidated forest, `Σ counts[i] * 2^i == len()`.
    pub fn counters_rep(&self, arena: &NodeArena) -> Vec<usize> {
        let mut counts: Vec<usize> = Vec::new();
        for root in self.roots(arena) {
            let r = arena.node(root).rank as usize;
            if r >= counts.len() {
                counts.resize(r + 1, 0);
            }
            counts[r] += 1;
        }
        counts
    }

    /// Sets the key of `x` to `new_key` (not above its current key) and
    /// repairs heap order. Always leaves `min` correct.
    fn decrease_to(&mut self, arena: &mut NodeArena, x: NodeRef, new_key: i64) {
        arena.node_mut(x).key = new_key;

        if let Some(parent) = arena.node(x).parent {
            if arena.node(parent).key >= new_key {
                self.cascading_cut(arena, x);
            }
        }

        if self.min.map_or(true, |m| new_key <= arena.node(m).key) {
            self.min = Some(x);
        }
    }

    /// Cuts `x` and then every marked ancestor, marking the first unmarked
    /// non-root ancestor.
    ///
    /// `x` must have a parent.
    fn cascading_cut(&mut self, arena: &mut NodeArena, x: NodeRef) {
        if !arena.node(x).mark {
            arena.node_mut(x).mark = true;
            self.marked_count += 1;
        }

        let mut current = x;
        let mut cuts = 0u64;
        loop {
            let Some(parent) = arena.node(current).parent else {
                break;
            };
            self.cut(arena, current, parent);
            cuts += 1;
            current = parent;

            let node = arena.node(current);
            if !node.mark || node.parent.is_none() {
                break;
            }
        }

        let survivor = arena.node_mut(current);
        if survivor.parent.is_some() && !survivor.mark {
            survivor.mark = true;
            self.marked_count += 1;
        }

        tracing::trace!(cuts, "cascading cut");
    }

    /// Moves `x` from `parent`'s child ring to the front of the root ring.
    fn cut(&mut self, arena: &mut NodeArena, x: NodeRef, parent: NodeRef) {
        let next_sibling = ring::unlink(arena, x);

        let p = arena.node_mut(parent);
        if p.child == Some(x) {
            p.child = next_sibling;
        }
        p.rank = checked_decrement(p.rank);

        let node = arena.node_mut(x);
        node.parent = None;
        if node.mark {
            node.mark = false;
            self.marked_count -= 1;
        }

        self.roots_start = ring::splice_opt(arena, self.roots_start, Some(x));
        self.tree_count += 1;
        self.cuts += 1;
        counters::record_cuts(1);
    }

    /// Hangs the larger of two same-rank roots under the other and returns
    /// the new root.
    ///
    /// `occupant` (the earlier-visited root) stays on top only when its key is
    /// strictly smaller, so `arriving` wins ties. The loser becomes the first
    /// member of the winner's child ring.
    fn link(arena: &mut NodeArena, occupant: NodeRef, arriving: NodeRef) -> NodeRef {
        let (parent, child) = if arena.node(occupant).key < arena.node(arriving).key {
            (occupant, arriving)
        } else {
            (arriving, occupant)
        };

        ring::make_singleton(arena, child);
        arena.node_mut(child).parent = Some(parent);

        let existing = arena.node(parent).child;
        let children = ring::splice_opt(arena, existing, Some(child));
        let p = arena.node_mut(parent);
        p.child = children;
        p.rank = checked_increment(p.rank);
        parent
    }

    /// Removes root `x`, promoting its children to the front of the root
    /// ring, and releases it from the arena. Does not touch `min`.
    fn extract_root(&mut self, arena: &mut NodeArena, x: NodeRef) -> i64 {
        let child = arena.node(x).child;
        let mut promoted = 0usize;
        let mut unmarked = 0usize;
        if let Some(first) = child {
            let mut c = first;
            loop {
                let node = arena.node_mut(c);
                node.parent = None;
                if node.mark {
                    node.mark = false;
                    unmarked += 1;
                }
                promoted += 1;
                c = node.next;
                if c == first {
                    break;
                }
            }
        }

        let following = ring::unlink(arena, x);
        let anchor = if self.roots_start == Some(x) {
            following
        } else {
            self.roots_start
        };
        self.roots_start = ring::splice_opt(arena, anchor, child);

        let removed = arena.remove(x);
        let was_marked = removed.as_ref().is_some_and(|n| n.mark);

        self.size -= 1;
        self.tree_count = self.tree_count + promoted - 1;
        self.marked_count -= unmarked + usize::from(was_marked);
        removed.map_or(0, |n| n.key)
    }

    #[inline]
    fn check_invariants(&self, arena: &NodeArena) {
        #[cfg(feature = "invariant-checks")]
        if let Err(err) = self.validate(arena) {
            panic!("forest invariant violated: {err}");
        }
        #[cfg(not(feature = "invariant-checks"))]
        let _ = arena;
    }
}
