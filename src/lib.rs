//! Fibonacci forest: a mergeable priority queue over `i64` keys
//!
//! This crate provides a Fibonacci heap built from lazily consolidated trees
//! with cascading cuts:
//!
//! - **insert** and **decrease_key**: O(1) amortized
//! - **meld**: O(1)
//! - **delete_min** and **delete**: O(log n) amortized
//! - **k_smallest** on a single-tree forest, without mutating it
//!
//! Nodes are owned by a [`NodeArena`] and addressed through generational
//! [`NodeRef`] handles. A [`Forest`] is a view over the arena holding only its
//! minimum, a root-ring anchor, and counters. Forests that share an arena can
//! meld by relinking their root rings.
//!
//! Process-wide link and cut totals for amortized-cost accounting are
//! available from [`counters`].
//!
//! # Example
//!
//! ```rust
//! use fibonacci_forest::{Forest, NodeArena};
//!
//! let mut arena = NodeArena::new();
//! let mut left = Forest::new();
//! let mut right = Forest::new();
//!
//! let handle = left.insert(&mut arena, 5);
//! left.insert(&mut arena, 9);
//! right.insert(&mut arena, 3);
//!
//! left.meld(&mut arena, right);
//! left.decrease_key(&mut arena, handle, 4);
//! assert_eq!(left.min_key(&arena), Some(1));
//! assert_eq!(left.delete_min(&mut arena), Some(1));
//! assert_eq!(left.delete_min(&mut arena), Some(3));
//! ```

pub mod arena;
pub mod counters;
pub mod error;
pub mod forest;
mod invariants;
pub mod kmin;
pub mod rank;
pub mod ring;

pub use arena::{Node, NodeArena, NodeRef};
pub use counters::{total_cuts, total_links};
pub use error::ForestError;
pub use forest::Forest;
pub use kmin::{k_smallest, BoundedBinaryHeap};
