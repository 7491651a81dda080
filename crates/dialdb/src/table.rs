//! Chained contact table
//!
//! Layout:
//! - `buckets`: fixed array of singly-linked chains, indexed by `key % buckets`
//! - `tracker`: injected [`RecordAccess`] sink told about every touched key
//!
//! The table never asks the tracker anything back; the tracker only ever
//! sees keys.

use dialcache::{RecencyTracker, RecordAccess};
use tracing::{debug, trace};

use crate::chain::{Chain, ChainIter};
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::record::{AddOutcome, Contact, DeleteOutcome, UpdateOutcome};

/// Contact table with chained buckets and an access history
pub struct ContactTable<T = RecencyTracker<u64>> {
    /// One chain per bucket index
    buckets: Vec<Chain>,

    /// Number of live records
    len: usize,

    /// Receives every touched key
    tracker: T,
}

impl ContactTable {
    /// Create a table with 100 buckets and a five-key history
    pub fn new() -> Self {
        let config = StoreConfig::default();
        Self::build(config.buckets, RecencyTracker::new(config.tracker_capacity))
    }

    /// Create a table sized by `config`
    ///
    /// # Returns
    /// * `Result<ContactTable>` - Error if either size is zero
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            config.buckets,
            RecencyTracker::new(config.tracker_capacity),
        ))
    }

    /// Touched keys, most recent first
    pub fn history(&self) -> dialcache::Iter<'_, u64> {
        self.tracker.iter()
    }
}

impl Default for ContactTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RecordAccess<u64>> ContactTable<T> {
    /// Create a table reporting accesses to a caller-supplied tracker
    ///
    /// # Arguments
    /// * `buckets` - Number of bucket chains, must be non-zero
    /// * `tracker` - Sink for touched keys
    pub fn with_tracker(buckets: usize, tracker: T) -> Result<Self> {
        if buckets == 0 {
            return Err(Error::ZeroBuckets);
        }
        Ok(Self::build(buckets, tracker))
    }

    fn build(buckets: usize, tracker: T) -> Self {
        Self {
            buckets: (0..buckets).map(|_| Chain::default()).collect(),
            len: 0,
            tracker,
        }
    }

    fn bucket_index(&self, key: u64) -> usize {
        (key % self.buckets.len() as u64) as usize
    }

    /// Insert a contact under a new key
    ///
    /// # Arguments
    /// * `key` - Phone number, already validated by the caller
    /// * `contact` - Name and email
    ///
    /// # Returns
    /// * `AddOutcome::Added` with the contact's name, or
    ///   `AddOutcome::AlreadyExists` if the key is taken (nothing changes)
    pub fn add(&mut self, key: u64, contact: Contact) -> AddOutcome {
        let index = self.bucket_index(key);
        let name = contact.name.clone();

        if !self.buckets[index].append(key, contact) {
            debug!(key, bucket = index, "rejected duplicate key");
            return AddOutcome::AlreadyExists;
        }

        self.len += 1;
        self.tracker.record_access(key);
        trace!(key, bucket = index, "added contact");
        AddOutcome::Added { name }
    }

    /// Look up a contact. A hit counts as an access; a miss does not.
    pub fn get(&mut self, key: u64) -> Option<&Contact> {
        let index = self.bucket_index(key);
        let Self {
            buckets, tracker, ..
        } = self;

        let found = buckets[index].find(key);
        if found.is_some() {
            tracker.record_access(key);
        }
        found
    }

    /// Check for a key without recording an access
    pub fn contains(&self, key: u64) -> bool {
        self.buckets[self.bucket_index(key)].contains(key)
    }

    /// Replace the record at `old_key` with `contact` stored under `new_key`
    ///
    /// The old record is unlinked and the new one goes through [`add`],
    /// so it lands at the end of its chain and `new_key` becomes the most
    /// recent access, even when `new_key == old_key`.
    ///
    /// # Returns
    /// * `UpdateOutcome::Updated` - Replaced
    /// * `UpdateOutcome::NotFound` - `old_key` is not in the table
    /// * `UpdateOutcome::AlreadyExists` - `new_key` belongs to a different
    ///   contact; nothing is removed
    ///
    /// [`add`]: ContactTable::add
    pub fn update(&mut self, old_key: u64, new_key: u64, contact: Contact) -> UpdateOutcome {
        if !self.contains(old_key) {
            debug!(key = old_key, "update of missing key");
            return UpdateOutcome::NotFound;
        }
        if new_key != old_key && self.contains(new_key) {
            debug!(old_key, new_key, "update target already taken");
            return UpdateOutcome::AlreadyExists;
        }

        let index = self.bucket_index(old_key);
        if self.buckets[index].remove(old_key).is_some() {
            self.len -= 1;
        }

        match self.add(new_key, contact) {
            AddOutcome::Added { .. } => UpdateOutcome::Updated,
            AddOutcome::AlreadyExists => UpdateOutcome::AlreadyExists,
        }
    }

    /// Remove a contact. A successful delete still counts as an access.
    pub fn delete(&mut self, key: u64) -> DeleteOutcome {
        let index = self.bucket_index(key);

        match self.buckets[index].remove(key) {
            Some(_) => {
                self.len -= 1;
                self.tracker.record_access(key);
                trace!(key, bucket = index, "deleted contact");
                DeleteOutcome::Deleted
            }
            None => DeleteOutcome::NotFound,
        }
    }

    /// Scan every bucket for contacts matching `predicate`
    ///
    /// Each match is returned and recorded as an access, in scan order, so
    /// the last match ends up most recent.
    pub fn search<F>(&mut self, mut predicate: F) -> Vec<(u64, Contact)>
    where
        F: FnMut(&Contact) -> bool,
    {
        let Self {
            buckets, tracker, ..
        } = self;

        let mut results = Vec::new();
        for chain in buckets.iter() {
            for (key, contact) in chain.iter() {
                if predicate(contact) {
                    tracker.record_access(key);
                    results.push((key, contact.clone()));
                }
            }
        }

        trace!(matches = results.len(), "search scan finished");
        results
    }

    /// Case-insensitive substring search over contact names
    pub fn search_name(&mut self, term: &str) -> Vec<(u64, Contact)> {
        let term = term.to_lowercase();
        self.search(|contact| contact.name.to_lowercase().contains(&term))
    }

    /// Record an access to `key` without looking it up
    pub fn touch(&mut self, key: u64) {
        self.tracker.record_access(key);
    }

    /// All records in bucket order, each chain front to back.
    /// Does not record any access.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            chain: ChainIter::default(),
        }
    }

    /// Owned copy of [`iter`](ContactTable::iter)
    pub fn contacts(&self) -> Vec<(u64, Contact)> {
        self.iter()
            .map(|(key, contact)| (key, contact.clone()))
            .collect()
    }

    /// Number of records in bucket `bucket` (0 for an out-of-range index)
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map_or(0, Chain::len)
    }

    /// Number of bucket chains
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The injected access tracker
    pub fn tracker(&self) -> &T {
        &self.tracker
    }
}

/// Bucket-order walk over a [`ContactTable`]
pub struct Iter<'a> {
    buckets: std::slice::Iter<'a, Chain>,
    chain: ChainIter<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u64, &'a Contact);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                return Some(item);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Tracker that remembers every access in order
    #[derive(Default)]
    struct AccessLog(Vec<u64>);

    impl RecordAccess<u64> for AccessLog {
        fn record_access(&mut self, key: u64) {
            self.0.push(key);
        }
    }

    fn contact(name: &str) -> Contact {
        Contact::new(name, format!("{}@example.com", name.to_lowercase()))
    }

    fn logged_table(buckets: usize) -> ContactTable<AccessLog> {
        ContactTable::with_tracker(buckets, AccessLog::default()).unwrap()
    }

    fn history(table: &ContactTable) -> Vec<u64> {
        table.history().collect()
    }

    #[test]
    fn test_add_and_get() {
        let mut table = ContactTable::new();

        let outcome = table.add(9876543210, contact("Asha"));
        assert_eq!(
            outcome,
            AddOutcome::Added {
                name: "Asha".to_string()
            }
        );
        assert_eq!(table.get(9876543210), Some(&contact("Asha")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_add_delete_get_absent() {
        let mut table = ContactTable::new();

        table.add(9876543210, contact("Asha"));
        assert_eq!(table.delete(9876543210), DeleteOutcome::Deleted);

        assert_eq!(table.get(9876543210), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut table = ContactTable::new();

        table.add(42, contact("First"));
        assert_eq!(table.add(42, contact("Second")), AddOutcome::AlreadyExists);

        assert_eq!(table.get(42), Some(&contact("First")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected_deep_in_chain() {
        let mut table = logged_table(10);

        for key in [3, 13, 23, 33] {
            table.add(key, contact("X"));
        }

        assert_eq!(table.add(13, contact("Y")), AddOutcome::AlreadyExists);
        assert_eq!(table.add(33, contact("Y")), AddOutcome::AlreadyExists);
        assert_eq!(table.chain_len(3), 4);
        // Rejected inserts are not accesses
        assert_eq!(table.tracker().0, vec![3, 13, 23, 33]);
    }

    #[test]
    fn test_collisions_share_a_chain() {
        let mut table = ContactTable::with_config(StoreConfig::default().with_buckets(10)).unwrap();

        table.add(7, contact("A"));
        table.add(17, contact("B"));
        table.add(27, contact("C"));

        assert_eq!(table.chain_len(7), 3);
        assert_eq!(table.get(17), Some(&contact("B")));
        assert_eq!(table.get(37), None);
    }

    #[test]
    fn test_delete_keeps_chain_intact() {
        let mut table = ContactTable::with_config(StoreConfig::default().with_buckets(10)).unwrap();
        for key in [1, 11, 21, 31, 41] {
            table.add(key, contact(&format!("C{key}")));
        }

        for victim in [1, 31, 41] {
            assert_eq!(table.delete(victim), DeleteOutcome::Deleted);

            let keys: Vec<u64> = table.iter().map(|(key, _)| key).collect();
            let unique: HashSet<u64> = keys.iter().copied().collect();
            assert_eq!(keys.len(), unique.len());
            assert!(!unique.contains(&victim));
            assert_eq!(keys.len(), table.len());
        }

        let keys: Vec<u64> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![11, 21]);
    }

    #[test]
    fn test_delete_missing() {
        let mut table = logged_table(10);
        table.add(1, contact("A"));

        assert_eq!(table.delete(2), DeleteOutcome::NotFound);
        assert_eq!(table.delete(11), DeleteOutcome::NotFound);
        assert_eq!(table.tracker().0, vec![1]);
    }

    #[test]
    fn test_delete_records_access() {
        let mut table = ContactTable::new();
        table.add(1, contact("A"));
        table.add(2, contact("B"));

        table.delete(1);

        assert_eq!(history(&table), vec![1, 2]);
    }

    #[test]
    fn test_get_miss_does_not_touch_tracker() {
        let mut table = logged_table(10);
        table.add(5, contact("A"));

        assert!(table.get(6).is_none());
        assert!(table.get(15).is_none());
        assert!(table.get(5).is_some());

        assert_eq!(table.tracker().0, vec![5, 5]);
    }

    #[test]
    fn test_update_moves_record() {
        let mut table = ContactTable::new();
        table.add(1, contact("Old"));
        table.add(2, contact("Other"));

        assert_eq!(table.update(1, 3, contact("New")), UpdateOutcome::Updated);

        assert_eq!(table.get(1), None);
        assert_eq!(table.get(3), Some(&contact("New")));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_update_promotes_new_key() {
        let mut table = logged_table(100);
        table.add(1, contact("Old"));
        table.add(2, contact("Other"));

        table.update(1, 3, contact("New"));

        assert_eq!(table.tracker().0.last(), Some(&3));
        assert!(!table.tracker().0[2..].contains(&1));

        let mut tracked = ContactTable::new();
        tracked.add(1, contact("Old"));
        tracked.add(2, contact("Other"));
        tracked.update(1, 3, contact("New"));
        assert_eq!(tracked.history().next(), Some(3));
    }

    #[test]
    fn test_update_same_key_reinserts_at_chain_end() {
        let mut table = logged_table(10);
        table.add(4, contact("A"));
        table.add(14, contact("B"));

        assert_eq!(table.update(4, 4, contact("A2")), UpdateOutcome::Updated);

        let chain: Vec<u64> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(chain, vec![14, 4]);
        assert_eq!(table.tracker().0, vec![4, 14, 4]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_update_missing() {
        let mut table = logged_table(10);
        table.add(1, contact("A"));

        assert_eq!(table.update(2, 3, contact("B")), UpdateOutcome::NotFound);
        assert!(!table.contains(3));
        assert_eq!(table.tracker().0, vec![1]);
    }

    #[test]
    fn test_update_onto_existing_key_changes_nothing() {
        let mut table = logged_table(10);
        table.add(1, contact("A"));
        table.add(2, contact("B"));

        assert_eq!(
            table.update(1, 2, contact("C")),
            UpdateOutcome::AlreadyExists
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1), Some(&contact("A")));
        assert_eq!(table.get(2), Some(&contact("B")));
    }

    #[test]
    fn test_iter_bucket_order() {
        let mut table = ContactTable::with_config(StoreConfig::default().with_buckets(10)).unwrap();
        for key in [25, 3, 15, 13, 9] {
            table.add(key, contact("X"));
        }

        let keys: Vec<u64> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![3, 13, 25, 15, 9]);
        assert_eq!(table.contacts().len(), 5);
    }

    #[test]
    fn test_iter_does_not_touch_tracker() {
        let mut table = logged_table(10);
        table.add(1, contact("A"));

        let _ = table.contacts();
        assert!(table.contains(1));

        assert_eq!(table.tracker().0, vec![1]);
    }

    #[test]
    fn test_iter_empty_table() {
        let table = ContactTable::new();
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_search_promotes_every_match() {
        let mut table = logged_table(100);
        table.add(100, contact("Police Emergency"));
        table.add(101, contact("Fire Brigade Emergency"));
        table.add(139, contact("Railway Helpline"));
        table.tracker.0.clear();

        let results = table.search_name("emergency");

        let keys: Vec<u64> = results.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec![100, 101]);
        assert_eq!(table.tracker().0, vec![100, 101]);
    }

    #[test]
    fn test_search_by_email() {
        let mut table = ContactTable::new();
        table.add(1, Contact::new("A", "a@nic.in"));
        table.add(2, Contact::new("B", "b@gov.in"));

        let results = table.search(|contact| contact.email.ends_with("nic.in"));

        assert_eq!(results, vec![(1, Contact::new("A", "a@nic.in"))]);
    }

    #[test]
    fn test_search_without_matches() {
        let mut table = logged_table(10);
        table.add(1, contact("A"));

        assert!(table.search_name("zzz").is_empty());
        assert_eq!(table.tracker().0, vec![1]);
    }

    #[test]
    fn test_tracker_eviction_through_table() {
        let mut table = ContactTable::new();

        for key in 1..=6 {
            table.add(key, contact("X"));
        }

        assert_eq!(history(&table), vec![6, 5, 4, 3, 2]);
        // The tracker forgets keys; the table does not
        assert_eq!(table.len(), 6);
        assert!(table.contains(1));
    }

    #[test]
    fn test_touch() {
        let mut table = ContactTable::new();
        table.add(1, contact("A"));
        table.add(2, contact("B"));

        table.touch(1);

        assert_eq!(history(&table), vec![1, 2]);
    }

    #[test]
    fn test_uniqueness_under_mixed_operations() {
        let mut table = ContactTable::with_config(StoreConfig::default().with_buckets(7)).unwrap();

        for step in 0..200u64 {
            let key = (step * 13) % 40;
            match step % 4 {
                0 | 1 => {
                    table.add(key, contact("X"));
                }
                2 => {
                    table.delete(key);
                }
                _ => {
                    table.update(key, (key + 5) % 40, contact("Y"));
                }
            }

            let keys: Vec<u64> = table.iter().map(|(key, _)| key).collect();
            let unique: HashSet<u64> = keys.iter().copied().collect();
            assert_eq!(keys.len(), unique.len());
            assert_eq!(keys.len(), table.len());
            for &key in &keys {
                assert!(table.contains(key));
            }
        }
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(matches!(
            ContactTable::with_config(StoreConfig::default().with_buckets(0)),
            Err(Error::ZeroBuckets)
        ));
        assert!(matches!(
            ContactTable::with_config(StoreConfig::default().with_tracker_capacity(0)),
            Err(Error::ZeroCapacity)
        ));
        assert!(matches!(
            ContactTable::with_tracker(0, AccessLog::default()),
            Err(Error::ZeroBuckets)
        ));
    }

    #[test]
    fn test_custom_history_capacity() {
        let config = StoreConfig::default().with_tracker_capacity(2);
        let mut table = ContactTable::with_config(config).unwrap();

        for key in 1..=4 {
            table.add(key, contact("X"));
        }

        assert_eq!(history(&table), vec![4, 3]);
        assert_eq!(table.tracker().capacity(), 2);
        assert_eq!(table.tracker().stats().evictions(), 2);
    }
}
