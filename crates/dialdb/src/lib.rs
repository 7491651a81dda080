//! # dialdb
//!
//! In-memory contact table keyed by phone number.
//!
//! - Fixed bucket array, collisions resolved by singly-linked chains
//! - Duplicate keys are rejected, never merged
//! - Every add, hit, update, delete and search match is reported to an
//!   injected [`RecordAccess`] implementation (by default a
//!   [`RecencyTracker`] holding the last five keys)
//!
//! Single-threaded: mutations take `&mut self` and nothing is locked.

#![warn(missing_docs)]

mod chain;
mod config;
mod error;
mod record;
mod table;

pub use config::{StoreConfig, DEFAULT_BUCKETS};
pub use dialcache::{RecencyTracker, RecordAccess, TrackerStats, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use record::{AddOutcome, Contact, DeleteOutcome, UpdateOutcome};
pub use table::{ContactTable, Iter};
