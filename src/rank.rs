//! Rank (child count) type for forest nodes.
//!
//! A node's rank is the exact number of its direct children. In a Fibonacci
//! forest a node of rank `r` roots a subtree of at least `F(r+2)` nodes, so the
//! largest reachable rank is about `1.44 * log₂(n)`. `u8` covers any heap that
//! fits in memory with a wide margin.

/// Type alias for node rank.
pub type Rank = u8;

/// Maximum representable rank.
pub const MAX_RANK: Rank = u8::MAX;

/// Increment a rank after a link, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`, which would require a forest far larger
/// than addressable memory.
///
/// # Example
///
/// ```rust
/// use fibonacci_forest::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1)
        .expect("rank overflow: a node cannot have more than 255 children in a Fibonacci forest")
}

/// Decrement a rank after a cut, panicking on underflow.
///
/// Unlike a saturating decrement this refuses to hide a corrupted child
/// count: a cut always removes a child that was counted.
///
/// # Panics
///
/// Panics if `rank == 0`.
///
/// ```rust
/// use fibonacci_forest::rank::checked_decrement;
///
/// assert_eq!(checked_decrement(1), 0);
/// ```
#[inline]
pub fn checked_decrement(rank: Rank) -> Rank {
    rank.checked_sub(1)
        .expect("rank underflow: cut from a node with no counted children")
}

/// Size of a bucket table that can hold every rank reachable in a forest of
/// `size` elements.
///
/// Any rank is at most `size - 1` (one root holding every other node as a
/// direct child), so `size + 1` slots always suffice.
#[inline]
pub fn bucket_table_len(size: usize) -> usize {
    size.saturating_add(1).min(MAX_RANK as usize + 1)
}
