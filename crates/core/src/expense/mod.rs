//! Group expenses and the split calculation engine.
//!
//! One paid expense becomes a validated set of per-member obligations whose
//! amounts sum exactly to the expense total. The payer's own share never
//! enters the group ledger; it is emitted for the personal-expense
//! collaborator instead.

pub mod allocation;
pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use allocation::Allocator;
pub use engine::SplitEngine;
pub use error::SplitError;
pub use types::{
    Allocation, ComputedSplit, ComputedSplits, CreateExpenseInput, ExactShare, ExpenseCategory,
    GroupExpense, PaymentMethod, PercentShare, SelfShareExpense, ShareCount, Split, SplitStrategy,
};
