//! Default emergency contacts loaded at startup

use dialdb::{AddOutcome, Contact, ContactTable};
use tracing::warn;

/// Emergency and helpline numbers, in load order
pub const DEFAULT_CONTACTS: [(u64, &str, &str); 10] = [
    (100, "Police Emergency", "police@india.gov.in"),
    (101, "Fire Brigade Emergency", "fire@india.gov.in"),
    (102, "Ambulance Emergency", "ambulance@india.gov.in"),
    (9711077372, "NDRF Emergency", "controlroom@ndrf.nic.in"),
    (1091, "Women's Helpline", "ncw@nic.in"),
    (1098, "Child Helpline", "info@childlineindia.org.in"),
    (14567, "Senior Citizen Helpline", "elderline@elderline.gov.in"),
    (139, "Railway Helpline", "care@irctc.co.in"),
    (103, "Traffic Police Emergency", "traffic@india.gov.in"),
    (1554, "Coast Guard Emergency", "dte-info@indiancoastguard.nic.in"),
];

/// Add the default contacts through the normal insert path.
///
/// Returns how many were added; numbers already present are skipped.
pub fn seed_defaults(table: &mut ContactTable) -> usize {
    let mut added = 0;
    for (phone, name, email) in DEFAULT_CONTACTS {
        match table.add(phone, Contact::new(name, email)) {
            AddOutcome::Added { .. } => added += 1,
            AddOutcome::AlreadyExists => warn!(phone, "default contact already present"),
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_defaults() {
        let mut table = ContactTable::new();

        assert_eq!(seed_defaults(&mut table), 10);
        assert_eq!(table.len(), 10);
        assert_eq!(
            table.get(139),
            Some(&Contact::new("Railway Helpline", "care@irctc.co.in"))
        );
    }

    #[test]
    fn test_seed_fills_history_with_last_five() {
        let mut table = ContactTable::new();
        seed_defaults(&mut table);

        let history: Vec<u64> = table.history().collect();
        assert_eq!(history, vec![1554, 103, 139, 14567, 1098]);
    }

    #[test]
    fn test_seed_twice_skips_existing() {
        let mut table = ContactTable::new();
        seed_defaults(&mut table);

        assert_eq!(seed_defaults(&mut table), 0);
        assert_eq!(table.len(), 10);
    }
}
