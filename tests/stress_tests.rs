//! Stress tests that push the forest through long operation sequences
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and check the amortized-cost counters under load.

use fibonacci_forest::{total_cuts, total_links, Forest, NodeArena, NodeRef};

fn drain(forest: &mut Forest, arena: &mut NodeArena) -> Vec<i64> {
    let mut out = Vec::with_capacity(forest.len());
    while let Some(key) = forest.delete_min(arena) {
        out.push(key);
    }
    out
}

/// Forces one consolidation so later operations work on real trees.
fn settle(forest: &mut Forest, arena: &mut NodeArena) {
    forest.insert(arena, i64::MIN);
    assert_eq!(forest.delete_min(arena), Some(i64::MIN));
}

#[test]
fn test_massive_operations() {
    let mut arena = NodeArena::with_capacity(10_000);
    let mut forest = Forest::new();

    for key in (0..10_000).rev() {
        forest.insert(&mut arena, key);
    }
    assert_eq!(forest.len(), 10_000);
    assert_eq!(forest.min_key(&arena), Some(0));

    for key in 0..10_000 {
        assert_eq!(forest.delete_min(&mut arena), Some(key));
    }
    assert!(forest.is_empty());
    assert!(arena.is_empty());
}

#[test]
fn test_many_decrease_keys() {
    let mut arena = NodeArena::new();
    let mut forest = Forest::new();

    let handles: Vec<NodeRef> = (0..500).map(|i| forest.insert(&mut arena, 10_000 + i)).collect();
    settle(&mut forest, &mut arena);

    for handle in &handles {
        forest.decrease_key(&mut arena, *handle, 10_000);
    }
    assert!(forest.validate(&arena).is_ok());
    assert!(forest.cut_count() <= 2 * handles.len() as u64);

    assert_eq!(drain(&mut forest, &mut arena), (0..500).collect::<Vec<_>>());
}

#[test]
fn test_decrease_keys_in_reverse_order() {
    let mut arena = NodeArena::new();
    let mut forest = Forest::new();

    let handles: Vec<NodeRef> = (0..1024).map(|i| forest.insert(&mut arena, i)).collect();
    settle(&mut forest, &mut arena);
    assert_eq!(forest.tree_count(), 1);

    // Pull the largest keys below everything else, deepest nodes first
    for (i, handle) in handles.iter().enumerate().rev().take(300) {
        forest.decrease_key(&mut arena, *handle, 2_000 + i as i64);
        assert_eq!(arena.key(*handle), Some(-2_000));
    }
    assert!(forest.validate(&arena).is_ok());
    assert_eq!(forest.min_key(&arena), Some(-2_000));
    assert!(forest.cut_count() <= 600);
    assert_eq!(forest.potential(), forest.tree_count() + 2 * forest.marked_count());

    let drained = drain(&mut forest, &mut arena);
    assert_eq!(drained.len(), 1024);
    assert!(drained.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(&drained[..300], &[-2_000; 300][..]);
}

#[test]
fn test_alternating_ops() {
    let mut arena = NodeArena::new();
    let mut forest = Forest::new();

    let mut last = i64::MIN;
    for i in 0..2_000 {
        forest.insert(&mut arena, i * 2);
        forest.insert(&mut arena, i * 2 + 1);
        let popped = forest.delete_min(&mut arena).unwrap();
        assert!(popped >= last);
        last = popped;
    }
    assert_eq!(forest.len(), 2_000);
    assert!(forest.validate(&arena).is_ok());

    let rest = drain(&mut forest, &mut arena);
    assert!(rest.windows(2).all(|w| w[0] <= w[1]));
    assert!(rest[0] >= last);
}

#[test]
fn test_large_meld() {
    let mut arena = NodeArena::new();
    let mut evens = Forest::new();
    let mut odds = Forest::new();

    for i in 0..1_000 {
        evens.insert(&mut arena, i * 2);
        odds.insert(&mut arena, i * 2 + 1);
    }
    settle(&mut evens, &mut arena);
    settle(&mut odds, &mut arena);
    let links = evens.link_count() + odds.link_count();

    evens.meld(&mut arena, odds);
    assert_eq!(evens.len(), 2_000);
    assert_eq!(evens.link_count(), links);
    assert!(evens.validate(&arena).is_ok());

    assert_eq!(drain(&mut evens, &mut arena), (0..2_000).collect::<Vec<_>>());
}

#[test]
fn test_link_count_after_first_delete_min() {
    for n in [2usize, 3, 8, 100, 1_000, 4_097] {
        let mut arena = NodeArena::new();
        let mut forest = Forest::new();
        for key in 0..n as i64 {
            forest.insert(&mut arena, key);
        }
        assert_eq!(forest.link_count(), 0);

        forest.delete_min(&mut arena);
        let rest = n - 1;
        assert_eq!(forest.link_count(), (rest - rest.count_ones() as usize) as u64);
        assert_eq!(forest.tree_count(), rest.count_ones() as usize);
        assert!(total_links() >= forest.link_count());
    }
}

#[test]
fn test_delete_many_arbitrary_nodes() {
    let mut arena = NodeArena::new();
    let mut forest = Forest::new();

    let handles: Vec<(NodeRef, i64)> = (0..600)
        .map(|i| {
            let key = (i * 7_919) % 600;
            (forest.insert(&mut arena, key), key)
        })
        .collect();
    settle(&mut forest, &mut arena);

    let mut kept = Vec::new();
    for (i, &(handle, key)) in handles.iter().enumerate() {
        if i % 3 == 0 {
            assert_eq!(forest.delete(&mut arena, handle), Some(key));
            assert!(!arena.contains(handle));
        } else {
            kept.push(key);
        }
    }
    assert!(forest.validate(&arena).is_ok());
    assert_eq!(forest.len(), kept.len());
    assert!(forest.cut_count() <= 2 * 200);
    assert!(total_cuts() >= forest.cut_count());

    kept.sort_unstable();
    assert_eq!(drain(&mut forest, &mut arena), kept);
}

#[test]
fn test_extreme_keys() {
    let mut arena = NodeArena::new();
    let mut forest = Forest::new();

    let high = forest.insert(&mut arena, i64::MAX);
    let low = forest.insert(&mut arena, i64::MIN);
    let zero = forest.insert(&mut arena, 0);
    forest.insert(&mut arena, 1);
    forest.consolidate(&mut arena);
    assert_eq!(forest.tree_count(), 1);

    // Saturates instead of wrapping
    forest.decrease_key(&mut arena, low, 5);
    assert_eq!(arena.key(low), Some(i64::MIN));
    forest.decrease_key(&mut arena, zero, i64::MAX);
    assert_eq!(arena.key(zero), Some(-i64::MAX));

    // The minimum already holds i64::MIN, so deletion ties with it
    assert_eq!(forest.delete(&mut arena, high), Some(i64::MAX));
    assert!(forest.validate(&arena).is_ok());
    assert_eq!(forest.min_key(&arena), Some(i64::MIN));

    assert_eq!(drain(&mut forest, &mut arena), vec![i64::MIN, -i64::MAX, 1]);
}

#[test]
fn test_stale_handles_after_heavy_churn() {
    let mut arena = NodeArena::new();
    let mut forest = Forest::new();

    let mut stale = Vec::new();
    for round in 0..50 {
        for i in 0..20 {
            forest.insert(&mut arena, round * 100 + i);
        }
        let min = forest.min().unwrap();
        forest.delete_min(&mut arena);
        stale.push(min);
    }

    let before = forest.len();
    for &handle in &stale {
        forest.decrease_key(&mut arena, handle, 1_000);
        assert_eq!(forest.delete(&mut arena, handle), None);
    }
    assert_eq!(forest.len(), before);
    assert!(forest.validate(&arena).is_ok());
}
