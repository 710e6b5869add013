//! Settlement domain types.
//!
//! A split's settlement status moves through a small workflow:
//! - Pending → Requested (the debtor claims they have paid)
//! - Requested → Confirmed (the payer accepts the claim; terminal)
//! - Requested → Pending (the payer rejects the claim)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{GroupId, SettlementId, UserId};

/// Where one obligation sits in the settlement workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Payment not initiated.
    Pending,
    /// The debtor has claimed the obligation is paid.
    Requested,
    /// The payer has confirmed receipt (terminal).
    Confirmed,
}

impl SettlementStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Requested => "requested",
            Self::Confirmed => "confirmed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "requested" => Some(Self::Requested),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }

    /// Returns true once no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement action representing a state transition with audit data.
#[derive(Debug, Clone)]
pub enum SettlementAction {
    /// The debtor requested settlement of their obligation.
    Request {
        /// The new status after the request.
        new_status: SettlementStatus,
        /// The debtor who requested.
        requested_by: UserId,
    },
    /// The payer confirmed the obligation as settled.
    Confirm {
        /// The new status after confirmation.
        new_status: SettlementStatus,
        /// The payer who confirmed.
        confirmed_by: UserId,
        /// When the obligation was settled.
        settled_at: DateTime<Utc>,
    },
    /// The payer rejected the settlement claim.
    Reject {
        /// The new status after rejection (back to Pending).
        new_status: SettlementStatus,
        /// The payer who rejected.
        rejected_by: UserId,
    },
}

impl SettlementAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> SettlementStatus {
        match self {
            Self::Request { new_status, .. }
            | Self::Confirm { new_status, .. }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }
}

/// Status tag on a direct member-to-member payment record.
///
/// Deliberately not a state machine: a record is created pending and is
/// either marked settled or cancelled once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectSettlementStatus {
    /// Recorded, not yet completed.
    Pending,
    /// The payment went through.
    Settled,
    /// The record was abandoned.
    Cancelled,
}

/// A direct member-to-member payment record, outside any single expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectSettlement {
    /// Unique identifier for the record.
    pub id: SettlementId,
    /// The group the payment belongs to.
    pub group_id: GroupId,
    /// Who paid.
    pub from_user: UserId,
    /// Who received.
    pub to_user: UserId,
    /// The amount transferred.
    pub amount: Decimal,
    /// Current status tag.
    pub status: DirectSettlementStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the payment completed (settled or cancelled).
    pub completed_at: Option<DateTime<Utc>>,
    /// Free-form payment method label.
    pub payment_method: Option<String>,
    /// External transaction reference.
    pub transaction_reference: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}
