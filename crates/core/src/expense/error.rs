//! Error types for split calculation.

use rust_decimal::Decimal;
use splitledger_shared::types::UserId;
use thiserror::Error;

/// Errors that can occur while computing splits for an expense.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The expense amount was zero or negative.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// The amount carried more fraction digits than the currency allows.
    #[error("Amount {amount} exceeds {max_places} fraction digits")]
    AmountPrecision {
        /// The offending amount.
        amount: Decimal,
        /// Fraction digits allowed by the group currency.
        max_places: u32,
    },

    /// The target member list was empty.
    #[error("An expense needs at least one member to split across")]
    NoMembers,

    /// The payer is not in the target member list.
    #[error("Payer {0} is not among the group's members")]
    PayerNotListed(UserId),

    /// Supplied amounts or percentages do not sum to the expected total.
    #[error("Allocation sums to {actual}, expected {expected}")]
    AllocationMismatch {
        /// The total the inputs had to reach.
        expected: Decimal,
        /// What they actually summed to.
        actual: Decimal,
    },

    /// The allocation references unknown members, repeats a member, or is
    /// otherwise unusable (e.g. zero total shares).
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),
}

impl SplitError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NonPositiveAmount(_)
            | Self::AmountPrecision { .. }
            | Self::NoMembers
            | Self::PayerNotListed(_)
            | Self::AllocationMismatch { .. }
            | Self::InvalidAllocation(_) => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::AmountPrecision { .. } => "AMOUNT_PRECISION",
            Self::NoMembers => "NO_MEMBERS",
            Self::PayerNotListed(_) => "PAYER_NOT_LISTED",
            Self::AllocationMismatch { .. } => "ALLOCATION_MISMATCH",
            Self::InvalidAllocation(_) => "INVALID_ALLOCATION",
        }
    }
}
