//! Per-split settlement state machine.
//!
//! Pending → Requested → {Confirmed | Pending}. Confirmed is terminal;
//! rejection puts the obligation back to Pending rather than parking it in a
//! dead state.

pub mod error;
pub mod service;
pub mod types;

pub use error::SettlementError;
pub use service::SettlementService;
pub use types::{
    DirectSettlement, DirectSettlementStatus, SettlementAction, SettlementStatus,
};
