//! # dialcache
//!
//! Bounded access history for the dialbook contact table.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1) lookup)
//! - **Recency list**: doubly-linked list threaded through a node arena
//! - **Eviction**: least recent key drops out once capacity is exceeded
//!
//! The tracker only remembers keys. It never owns or removes contact
//! records; the table drives it through [`RecordAccess`].

#![warn(missing_docs)]

mod stats;
mod tracker;

pub use stats::TrackerStats;
pub use tracker::{Iter, RecencyTracker, DEFAULT_CAPACITY};

/// Capability to record that a key was touched.
///
/// Implemented by [`RecencyTracker`]; the contact table is generic over it
/// so the access-history coupling shows up in its type.
pub trait RecordAccess<K> {
    /// Note an access to `key`.
    fn record_access(&mut self, key: K);
}

impl<K, T: RecordAccess<K> + ?Sized> RecordAccess<K> for &mut T {
    fn record_access(&mut self, key: K) {
        (**self).record_access(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_all<A: RecordAccess<u64>>(mut access: A, keys: &[u64]) {
        for &key in keys {
            access.record_access(key);
        }
    }

    #[test]
    fn test_record_access_through_reference() {
        let mut tracker = RecencyTracker::new(2);
        touch_all(&mut tracker, &[7, 8, 9]);

        assert_eq!(tracker.iter().collect::<Vec<_>>(), vec![9, 8]);
        assert_eq!(tracker.stats().evictions(), 1);
    }
}
