//! Recency tracker
//!
//! Doubly-linked list threaded through a node arena, with an index from key
//! to slot. Promote and evict are both O(1).

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::stats::TrackerStats;
use crate::RecordAccess;

/// Number of keys a tracker remembers when no capacity is given
pub const DEFAULT_CAPACITY: usize = 5;

/// Node in the recency list
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Fixed-capacity history of the most recently touched keys
pub struct RecencyTracker<K> {
    index: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
    stats: TrackerStats,
}

impl<K> RecencyTracker<K>
where
    K: Hash + Eq + Clone,
{
    /// Create a new tracker holding at most `capacity` keys
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            index: HashMap::with_capacity_and_hasher(capacity + 1, RandomState::new()),
            nodes: Vec::with_capacity(capacity + 1),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
            stats: TrackerStats::new(),
        }
    }

    /// Move `key` to the most recent position, inserting it if absent.
    ///
    /// Inserting past capacity evicts exactly one key, the least recent.
    pub fn promote(&mut self, key: K) {
        self.stats.record_promotion();

        if let Some(&idx) = self.index.get(&key) {
            if self.head == Some(idx) {
                self.stats.record_head_hit();
                return;
            }
            self.unlink(idx);
            self.push_front(idx);
            self.stats.record_move();
            return;
        }

        let idx = self.alloc_node(Node {
            key: key.clone(),
            prev: None,
            next: None,
        });
        self.push_front(idx);
        self.index.insert(key, idx);
        self.stats.record_insert();
        trace!(slot = idx, len = self.index.len(), "tracked new key");

        if self.index.len() > self.capacity {
            self.evict();
        }
    }

    /// Keys from most recent to least recent
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tracker: self,
            cursor: self.head,
        }
    }

    /// Check whether `key` is currently tracked
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Most recently touched key
    pub fn head(&self) -> Option<&K> {
        self.head.and_then(|idx| self.key_at(idx))
    }

    /// Least recently touched key, next in line for eviction
    pub fn tail(&self) -> Option<&K> {
        self.tail.and_then(|idx| self.key_at(idx))
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of tracked keys
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counters for promotes and evictions
    pub fn stats(&self) -> &TrackerStats {
        &self.stats
    }

    /// Zero the counters. Tracked keys are untouched.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn key_at(&self, idx: usize) -> Option<&K> {
        self.nodes[idx].as_ref().map(|node| &node.key)
    }

    fn push_front(&mut self, idx: usize) {
        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        match self.head {
            Some(head_idx) => {
                if let Some(head) = &mut self.nodes[head_idx] {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.nodes[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn evict(&mut self) {
        let Some(tail_idx) = self.tail else {
            return;
        };

        self.unlink(tail_idx);
        if let Some(node) = self.nodes[tail_idx].take() {
            self.index.remove(&node.key);
            self.free_list.push(tail_idx);
            self.stats.record_eviction();
            debug!(slot = tail_idx, capacity = self.capacity, "evicted least recent key");
        }
    }

    fn alloc_node(&mut self, node: Node<K>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }
}

impl<K> Default for RecencyTracker<K>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K> RecordAccess<K> for RecencyTracker<K>
where
    K: Hash + Eq + Clone,
{
    fn record_access(&mut self, key: K) {
        self.promote(key);
    }
}

/// Head-to-tail traversal of a [`RecencyTracker`]
pub struct Iter<'a, K> {
    tracker: &'a RecencyTracker<K>,
    cursor: Option<usize>,
}

impl<'a, K: Clone> Iterator for Iter<'a, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let idx = self.cursor?;
        let node = self.tracker.nodes[idx].as_ref()?;
        self.cursor = node.next;
        Some(node.key.clone())
    }
}
