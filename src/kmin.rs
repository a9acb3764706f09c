//! k-smallest query over a single-tree forest
//!
//! [`k_smallest`] reports the `k` smallest keys of a forest holding exactly
//! one tree without modifying it. It runs a best-first walk down the tree: a
//! small auxiliary min-heap holds the frontier, every extraction reports one
//! key and pushes that node's children.
//!
//! # Time Complexity
//!
//! The frontier heap is a binary heap, so each of the `k` extractions costs
//! O(deg · log h), where `deg` is the degree of the tree and `h` the
//! frontier size. The total is O(k · deg · log h). That is a logarithmic
//! factor above the O(k · deg) achievable with a flatter frontier structure.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_forest::{k_smallest, Forest, NodeArena};
//!
//! let mut arena = NodeArena::new();
//! let mut forest = Forest::new();
//! for key in [4, 1, 3, 0, 2, 7, 5, 6] {
//!     forest.insert(&mut arena, key);
//! }
//!
//! // Eight singleton roots consolidate into one binomial tree of rank 3
//! forest.consolidate(&mut arena);
//! assert_eq!(forest.tree_count(), 1);
//! assert_eq!(k_smallest(&forest, &arena, 3), vec![0, 1, 2]);
//! ```

use crate::arena::{NodeArena, NodeRef};
use crate::forest::Forest;
use crate::ring;

/// A fixed-capacity binary min-heap of `(key, node)` entries
///
/// Entries live in slots `1..=len` of the backing vector. Slot 0 is an unused
/// placeholder so that the parent of slot `i` is `i / 2` and its children
/// are `2i` and `2i + 1`.
#[derive(Debug, Clone)]
pub struct BoundedBinaryHeap {
    slots: Vec<(i64, NodeRef)>,
    capacity: usize,
}

impl BoundedBinaryHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push((0, NodeRef::default()));
        Self { slots, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds an entry, or returns `false` without storing it when full.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn push(&mut self, key: i64, node: NodeRef) -> bool {
        if self.len() == self.capacity {
            return false;
        }
        self.slots.push((key, node));
        self.sift_up(self.len());
        true
    }

    pub fn peek(&self) -> Option<(i64, NodeRef)> {
        self.slots.get(1).copied()
    }

    /// Removes the entry with the smallest key.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn pop(&mut self) -> Option<(i64, NodeRef)> {
        if self.is_empty() {
            return None;
        }

        let last = self.len();
        self.slots.swap(1, last);
        let top = self.slots.pop();
        if !self.is_empty() {
            self.sift_down(1);
        }
        top
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 1 {
            let parent = index / 2;
            if self.slots[index].0 < self.slots[parent].0 {
                self.slots.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.len();
        loop {
            let left = 2 * index;
            let right = left + 1;
            let mut smallest = index;

            if left <= len && self.slots[left].0 < self.slots[smallest].0 {
                smallest = left;
            }
            if right <= len && self.slots[right].0 < self.slots[smallest].0 {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.slots.swap(index, smallest);
            index = smallest;
        }
    }
}

/// Returns the `k` smallest keys of a single-tree forest in ascending order.
///
/// The forest must consist of one tree; on a forest with several roots the
/// result only covers the tree rooted at the cached minimum. An empty forest
/// or `k == 0` yields an empty vector, and `k` larger than the forest yields
/// every key. Neither the forest nor the arena is modified.
pub fn k_smallest(forest: &Forest, arena: &NodeArena, k: usize) -> Vec<i64> {
    let Some(root) = forest.min() else {
        return Vec::new();
    };
    let Some(root_key) = arena.key(root) else {
        return Vec::new();
    };
    let k = k.min(forest.len());
    if k == 0 {
        return Vec::new();
    }

    let mut frontier = BoundedBinaryHeap::with_capacity(forest.len());
    frontier.push(root_key, root);

    let mut keys = Vec::with_capacity(k);
    while keys.len() < k {
        let Some((key, node)) = frontier.pop() else {
            break;
        };
        keys.push(key);

        let first_child = arena.get(node).and_then(|n| n.child());
        for child in ring::iter_opt(arena, first_child) {
            if let Some(child_key) = arena.key(child) {
                frontier.push(child_key, child);
            }
        }
    }
    keys
}
