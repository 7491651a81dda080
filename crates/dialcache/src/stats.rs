//! Tracker statistics

/// Counters describing how a tracker has been driven
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackerStats {
    promotions: u64,
    inserts: u64,
    moves: u64,
    head_hits: u64,
    evictions: u64,
}

impl TrackerStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_move(&mut self) {
        self.moves += 1;
    }

    pub(crate) fn record_head_hit(&mut self) {
        self.head_hits += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Total promote calls
    pub fn promotions(&self) -> u64 {
        self.promotions
    }

    /// Promotes that created a new node
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// Promotes that relinked an existing node at the head
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Promotes of the key already at the head
    pub fn head_hits(&self) -> u64 {
        self.head_hits
    }

    /// Keys dropped because capacity was exceeded
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Share of promotes that found the key already at the head (0.0 to 1.0)
    pub fn head_hit_ratio(&self) -> f64 {
        if self.promotions == 0 {
            0.0
        } else {
            self.head_hits as f64 / self.promotions as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
