//! Table construction parameters

use dialcache::DEFAULT_CAPACITY;

use crate::error::{Error, Result};

/// Bucket count used when none is given
pub const DEFAULT_BUCKETS: usize = 100;

/// Sizing for a [`ContactTable`](crate::ContactTable)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of bucket chains
    pub buckets: usize,

    /// Number of keys the access history keeps
    pub tracker_capacity: usize,
}

impl StoreConfig {
    /// Set the bucket count
    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    /// Set the access history size
    pub fn with_tracker_capacity(mut self, capacity: usize) -> Self {
        self.tracker_capacity = capacity;
        self
    }

    /// Reject sizes a table cannot be built with
    pub fn validate(&self) -> Result<()> {
        if self.buckets == 0 {
            return Err(Error::ZeroBuckets);
        }
        if self.tracker_capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            tracker_capacity: DEFAULT_CAPACITY,
        }
    }
}
