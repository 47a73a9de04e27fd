//! Id allocation port

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out record ids for a collection
pub trait IdAllocator: Send + Sync {
    /// Next id, given the highest id currently in the collection
    fn next_id(&self, current_max: Option<u64>) -> u64;
}

/// `max(existing) + 1`, or 1 for an empty collection
///
/// Only correct for a single sequential writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxPlusOne;

impl IdAllocator for MaxPlusOne {
    fn next_id(&self, current_max: Option<u64>) -> u64 {
        current_max.map_or(1, |max| max + 1)
    }
}

/// Monotonic in-process counter
///
/// Never reuses an id it handed out, even when two callers computed the
/// same `current_max`, and never goes below `current_max + 1`.
#[derive(Debug, Default)]
pub struct AtomicSequence {
    last: AtomicU64,
}

impl AtomicSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after an id already known to be taken
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }
}

impl IdAllocator for AtomicSequence {
    fn next_id(&self, current_max: Option<u64>) -> u64 {
        let floor = current_max.unwrap_or(0);
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(last.max(floor) + 1));
        match previous {
            Ok(last) | Err(last) => last.max(floor) + 1,
        }
    }
}
