//! Error types for settlement transitions.

use splitledger_shared::types::UserId;
use thiserror::Error;

use super::types::SettlementStatus;

/// Errors that can occur during settlement transitions.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// Attempted an invalid status transition.
    #[error("Invalid settlement transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: SettlementStatus,
        /// The attempted target status.
        to: SettlementStatus,
    },

    /// The actor is not the member who owes on this split.
    #[error("User {actor} is not a party to this obligation")]
    NotAParty {
        /// The user who attempted the action.
        actor: UserId,
    },

    /// The actor is not the payer of the expense.
    #[error("User {actor} is not the payer of this expense")]
    Forbidden {
        /// The user who attempted the action.
        actor: UserId,
    },
}

impl SettlementError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 400,
            Self::NotAParty { .. } | Self::Forbidden { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotAParty { .. } => "NOT_A_PARTY",
            Self::Forbidden { .. } => "FORBIDDEN",
        }
    }
}
