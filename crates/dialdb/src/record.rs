//! Contact records and operation outcomes

use serde::{Deserialize, Serialize};

/// Name and email stored under a phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl Contact {
    /// Create a contact
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Result of [`ContactTable::add`](crate::ContactTable::add)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Inserted; carries the contact's name
    Added {
        /// Name of the inserted contact
        name: String,
    },
    /// Key already present, table unchanged
    AlreadyExists,
}

/// Result of [`ContactTable::update`](crate::ContactTable::update)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Old record replaced
    Updated,
    /// Old key not present
    NotFound,
    /// New key belongs to another contact, table unchanged
    AlreadyExists,
}

/// Result of [`ContactTable::delete`](crate::ContactTable::delete)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Record removed
    Deleted,
    /// Key not present
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_json_shape() {
        let contact = Contact::new("Police Emergency", "police@india.gov.in");
        let json = serde_json::to_string(&contact).unwrap();

        assert_eq!(
            json,
            r#"{"name":"Police Emergency","email":"police@india.gov.in"}"#
        );
        assert_eq!(serde_json::from_str::<Contact>(&json).unwrap(), contact);
    }
}
