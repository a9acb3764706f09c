//! Whole-structure consistency check for a forest
//!
//! [`Forest::validate`] walks every ring reachable from the root-ring anchor
//! and verifies:
//!
//! - every ring is circular and doubly consistent
//! - roots have no parent and are unmarked
//! - every child points back to the owner of its ring
//! - no child has a smaller key than its parent
//! - every rank equals its child ring length
//! - the cached minimum is a root with the smallest root key
//! - the size, tree and marked counters match the walked structure
//!
//! Walks are bounded by the arena size, so a corrupted ring reports an error
//! instead of looping.

use crate::arena::{NodeArena, NodeRef};
use crate::error::ForestError;
use crate::forest::Forest;

impl Forest {
    /// Checks every structural invariant, returning the first violation.
    ///
    /// # Time Complexity
    /// O(n)
    pub fn validate(&self, arena: &NodeArena) -> Result<(), ForestError> {
        let Some(start) = self.roots_start() else {
            if self.min().is_some() {
                return Err(ForestError::MinMismatch);
            }
            return check_counts(self, 0, 0, 0);
        };

        let roots = walk_ring(arena, start)?;
        for &root in &roots {
            let node = arena.node(root);
            if node.parent.is_some() {
                return Err(ForestError::RootHasParent(root));
            }
            if node.mark {
                return Err(ForestError::MarkedRoot(root));
            }
        }

        let min = self.min().ok_or(ForestError::MinMismatch)?;
        let min_key = arena.key(min).ok_or(ForestError::StaleHandle(min))?;
        if !roots.contains(&min) || roots.iter().any(|&r| arena.node(r).key < min_key) {
            return Err(ForestError::MinMismatch);
        }

        let mut size = 0usize;
        let mut marked = 0usize;
        let mut pending = roots.clone();
        while let Some(x) = pending.pop() {
            size += 1;
            if size > arena.len() {
                // A node reachable twice means a child ring loops back upward
                return Err(ForestError::WrongSize {
                    expected: self.len(),
                    actual: size,
                });
            }

            let node = arena.node(x);
            if node.mark {
                marked += 1;
            }

            let children = match node.child {
                Some(first) => walk_ring(arena, first)?,
                None => Vec::new(),
            };
            if children.len() != node.rank as usize {
                return Err(ForestError::WrongRank {
                    node: x,
                    rank: node.rank as usize,
                    children: children.len(),
                });
            }

            for &c in &children {
                let child = arena.node(c);
                if child.parent != Some(x) {
                    return Err(ForestError::BrokenParentLink(c));
                }
                if child.key < node.key {
                    return Err(ForestError::HeapOrderViolated(c));
                }
            }
            pending.extend(children);
        }

        check_counts(self, size, roots.len(), marked)
    }
}

fn check_counts(
    forest: &Forest,
    size: usize,
    trees: usize,
    marked: usize,
) -> Result<(), ForestError> {
    if forest.len() != size {
        return Err(ForestError::WrongSize {
            expected: forest.len(),
            actual: size,
        });
    }
    if forest.tree_count() != trees {
        return Err(ForestError::WrongTreeCount {
            expected: forest.tree_count(),
            actual: trees,
        });
    }
    if forest.marked_count() != marked {
        return Err(ForestError::WrongMarkedCount {
            expected: forest.marked_count(),
            actual: marked,
        });
    }
    Ok(())
}

/// Collects the ring containing `start`, checking every back link.
fn walk_ring(arena: &NodeArena, start: NodeRef) -> Result<Vec<NodeRef>, ForestError> {
    let mut members = Vec::new();
    let mut current = start;
    loop {
        let node = arena.get(current).ok_or(ForestError::StaleHandle(current))?;
        let next = arena.get(node.next).ok_or(ForestError::StaleHandle(node.next))?;
        if next.prev != current {
            return Err(ForestError::BrokenRing(current));
        }

        members.push(current);
        if members.len() > arena.len() {
            return Err(ForestError::BrokenRing(start));
        }

        current = node.next;
        if current == start {
            return Ok(members);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring;

    #[test]
    fn test_empty_forest_is_valid() {
        let arena = NodeArena::new();
        assert_eq!(Forest::new().validate(&arena), Ok(()));
    }

    #[test]
    fn test_wrong_counters() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);

        let forest = Forest::from_raw_parts(Some(a), Some(a), 1, 2, 0);
        assert_eq!(
            forest.validate(&arena),
            Err(ForestError::WrongSize { expected: 2, actual: 1 })
        );

        let forest = Forest::from_raw_parts(Some(a), Some(a), 3, 1, 0);
        assert_eq!(
            forest.validate(&arena),
            Err(ForestError::WrongTreeCount { expected: 3, actual: 1 })
        );

        let forest = Forest::from_raw_parts(Some(a), Some(a), 1, 1, 1);
        assert_eq!(
            forest.validate(&arena),
            Err(ForestError::WrongMarkedCount { expected: 1, actual: 0 })
        );
    }

    #[test]
    fn test_min_mismatch() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let start = ring::splice(&mut arena, a, b);

        let forest = Forest::from_raw_parts(Some(b), Some(start), 2, 2, 0);
        assert_eq!(forest.validate(&arena), Err(ForestError::MinMismatch));

        let forest = Forest::from_raw_parts(None, None, 0, 0, 0);
        assert_eq!(forest.validate(&arena), Ok(()));

        let forest = Forest::from_raw_parts(Some(a), None, 0, 0, 0);
        assert_eq!(forest.validate(&arena), Err(ForestError::MinMismatch));
    }

    #[test]
    fn test_heap_order_and_rank() {
        let mut arena = NodeArena::new();
        let parent = arena.alloc(5);
        let child = arena.alloc(3);
        arena.get_mut(child).unwrap().parent = Some(parent);
        arena.get_mut(parent).unwrap().child = Some(child);

        let forest = Forest::from_raw_parts(Some(parent), Some(parent), 1, 2, 0);
        assert_eq!(
            forest.validate(&arena),
            Err(ForestError::WrongRank { node: parent, rank: 0, children: 1 })
        );

        arena.get_mut(parent).unwrap().rank = 1;
        assert_eq!(forest.validate(&arena), Err(ForestError::HeapOrderViolated(child)));

        arena.get_mut(child).unwrap().key = 5;
        assert_eq!(forest.validate(&arena), Ok(()));

        arena.get_mut(child).unwrap().parent = None;
        assert_eq!(forest.validate(&arena), Err(ForestError::BrokenParentLink(child)));
    }

    #[test]
    fn test_broken_ring() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let start = ring::splice(&mut arena, a, b);
        arena.get_mut(a).unwrap().prev = a;

        let forest = Forest::from_raw_parts(Some(a), Some(start), 2, 2, 0);
        assert_eq!(forest.validate(&arena), Err(ForestError::BrokenRing(b)));
    }

    #[test]
    fn test_marked_root_and_stale_min() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        arena.get_mut(a).unwrap().mark = true;
        let forest = Forest::from_raw_parts(Some(a), Some(a), 1, 1, 1);
        assert_eq!(forest.validate(&arena), Err(ForestError::MarkedRoot(a)));

        let b = arena.alloc(2);
        arena.remove(a);
        let forest = Forest::from_raw_parts(Some(a), Some(b), 1, 1, 0);
        assert_eq!(forest.validate(&arena), Err(ForestError::StaleHandle(a)));
    }

    #[test]
    fn test_error_display() {
        let err = ForestError::WrongSize { expected: 3, actual: 2 };
        assert_eq!(err.to_string(), "size counter is 3 but 2 nodes are reachable");
    }
}
