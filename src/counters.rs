//! Process-wide link and cut totals
//!
//! These totals aggregate every forest in the process and exist for amortized
//! cost accounting only. Nothing in the forest's behavior depends on them.
//! They never reset. Per-forest tallies are available through
//! [`Forest::link_count`](crate::forest::Forest::link_count) and
//! [`Forest::cut_count`](crate::forest::Forest::cut_count).
//!
//! The counters are atomics so that forests living on different threads can
//! all contribute. `Relaxed` ordering is enough because no other memory is
//! published through them.

use std::sync::atomic::{AtomicU64, Ordering};

static LINKS: AtomicU64 = AtomicU64::new(0);
static CUTS: AtomicU64 = AtomicU64::new(0);

/// Total number of links (same-rank tree merges) performed by any forest.
pub fn total_links() -> u64 {
    LINKS.load(Ordering::Relaxed)
}

/// Total number of cuts (subtree detachments during decrease-key or delete)
/// performed by any forest.
pub fn total_cuts() -> u64 {
    CUTS.load(Ordering::Relaxed)
}

pub(crate) fn record_links(n: u64) {
    if n > 0 {
        LINKS.fetch_add(n, Ordering::Relaxed);
    }
}

pub(crate) fn record_cuts(n: u64) {
    if n > 0 {
        CUTS.fetch_add(n, Ordering::Relaxed);
    }
}
