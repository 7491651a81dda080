//! Bucket chains
//!
//! Each bucket is a singly-linked list of entries. New entries are appended
//! at the end, so chain order is insertion order.

use crate::record::Contact;

type Link = Option<Box<Entry>>;

struct Entry {
    key: u64,
    contact: Contact,
    next: Link,
}

/// Singly-linked chain of records sharing one bucket index
#[derive(Default)]
pub(crate) struct Chain {
    head: Link,
}

impl Chain {
    /// Append unless `key` is already somewhere in the chain.
    ///
    /// Returns `false` (and leaves the chain alone) on a duplicate.
    pub(crate) fn append(&mut self, key: u64, contact: Contact) -> bool {
        let mut cursor = &mut self.head;
        while let Some(entry) = cursor {
            if entry.key == key {
                return false;
            }
            cursor = &mut entry.next;
        }

        *cursor = Some(Box::new(Entry {
            key,
            contact,
            next: None,
        }));
        true
    }

    pub(crate) fn find(&self, key: u64) -> Option<&Contact> {
        self.iter()
            .find(|&(candidate, _)| candidate == key)
            .map(|(_, contact)| contact)
    }

    pub(crate) fn contains(&self, key: u64) -> bool {
        self.find(key).is_some()
    }

    /// Unlink the entry for `key`, splicing its successor into its place.
    pub(crate) fn remove(&mut self, key: u64) -> Option<Contact> {
        let mut cursor = &mut self.head;
        while matches!(cursor, Some(entry) if entry.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let removed = cursor.take()?;
        let Entry { contact, next, .. } = *removed;
        *cursor = next;
        Some(contact)
    }

    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    pub(crate) fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            next: self.head.as_deref(),
        }
    }
}

impl Drop for Chain {
    // Unlink iteratively so a long chain cannot overflow the stack.
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut entry) = link {
            link = entry.next.take();
        }
    }
}

/// Front-to-back walk over one chain
#[derive(Default)]
pub(crate) struct ChainIter<'a> {
    next: Option<&'a Entry>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (u64, &'a Contact);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|entry| {
            self.next = entry.next.as_deref();
            (entry.key, &entry.contact)
        })
    }
}
