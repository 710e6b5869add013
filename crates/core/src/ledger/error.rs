//! Error types for ledger operations.
//!
//! The ledger aggregates the per-module error enums and adds the lookup
//! failures only it can detect.

use rust_decimal::Decimal;
use splitledger_shared::error::AppError;
use splitledger_shared::types::{ExpenseId, GroupId, SettlementId, UserId};
use thiserror::Error;

use crate::expense::SplitError;
use crate::group::GroupError;
use crate::settlement::SettlementError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The referenced group does not exist.
    #[error("Group {0} not found")]
    GroupNotFound(GroupId),

    /// The referenced expense does not exist.
    #[error("Expense {0} not found")]
    ExpenseNotFound(ExpenseId),

    /// The referenced split does not exist.
    #[error("No split for member {user_id} on expense {expense_id}")]
    SplitNotFound {
        /// The expense looked up.
        expense_id: ExpenseId,
        /// The member looked up.
        user_id: UserId,
    },

    /// The referenced direct settlement record does not exist.
    #[error("Settlement {0} not found")]
    SettlementNotFound(SettlementId),

    /// The direct settlement record was already settled or cancelled.
    #[error("Settlement {0} is no longer pending")]
    SettlementClosed(SettlementId),

    /// A direct settlement amount must be positive.
    #[error("Settlement amount must be positive, got {0}")]
    NonPositiveSettlement(Decimal),

    /// The expense's split amounts no longer sum to its total.
    ///
    /// This should be impossible; it means the stored record set was
    /// corrupted and no state change may be applied to it.
    #[error("Split amounts for expense {0} no longer sum to its total")]
    CorruptedSplitSet(ExpenseId),

    /// Group or membership rule violation.
    #[error(transparent)]
    Group(#[from] GroupError),

    /// Split calculation failure.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// Settlement transition failure.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::GroupNotFound(_)
            | Self::ExpenseNotFound(_)
            | Self::SplitNotFound { .. }
            | Self::SettlementNotFound(_) => 404,
            Self::SettlementClosed(_) => 409,
            Self::NonPositiveSettlement(_) => 400,
            Self::CorruptedSplitSet(_) => 500,
            Self::Group(e) => e.status_code(),
            Self::Split(e) => e.status_code(),
            Self::Settlement(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::GroupNotFound(_) => "GROUP_NOT_FOUND",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
            Self::SplitNotFound { .. } => "SPLIT_NOT_FOUND",
            Self::SettlementNotFound(_) => "SETTLEMENT_NOT_FOUND",
            Self::SettlementClosed(_) => "SETTLEMENT_CLOSED",
            Self::NonPositiveSettlement(_) => "NON_POSITIVE_AMOUNT",
            Self::CorruptedSplitSet(_) => "CORRUPTED_SPLIT_SET",
            Self::Group(e) => e.error_code(),
            Self::Split(e) => e.error_code(),
            Self::Settlement(e) => e.error_code(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.status_code() {
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::BusinessRule(message),
            500 => Self::Internal(message),
            _ => Self::Validation(message),
        }
    }
}
