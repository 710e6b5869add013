//! The shared, concurrency-safe ledger and its operations.
//!
//! This module implements the inbound operation surface:
//! - group and membership management
//! - expense creation (atomic with its full split set)
//! - settlement transitions on individual splits
//! - balance reads and per-user position views
//! - direct member-to-member settlement records

pub mod error;
pub mod profile;
pub mod store;
pub mod types;


pub use error::LedgerError;
pub use profile::{NoProfiles, ProfileDirectory};
pub use store::SharedLedger;
pub use types::{
    DebtEntry, ExpenseCreated, ExpenseWithSplits, MemberPosition, RecordSettlementInput,
};
