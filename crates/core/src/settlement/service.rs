//! Settlement service for split state transitions.
//!
//! This module implements the state machine logic for moving one member's
//! obligation through the settlement workflow. All methods are stateless:
//! they validate a transition against the current status and the acting user
//! and return the `SettlementAction` to apply, never touching storage.

use chrono::Utc;
use splitledger_shared::types::UserId;

use super::error::SettlementError;
use super::types::{SettlementAction, SettlementStatus};

/// Stateless service for settlement workflow transitions.
pub struct SettlementService;

impl SettlementService {
    /// The debtor requests settlement of their obligation.
    ///
    /// # Arguments
    /// * `current_status` - The split's current status
    /// * `split_member` - The member who owes on the split
    /// * `actor` - The user performing the request
    ///
    /// # Returns
    /// * `Ok(SettlementAction::Request)` if the transition is valid
    /// * `Err(SettlementError::NotAParty)` if the actor is not the debtor
    /// * `Err(SettlementError::InvalidTransition)` if not in Pending status
    pub fn request(
        current_status: SettlementStatus,
        split_member: UserId,
        actor: UserId,
    ) -> Result<SettlementAction, SettlementError> {
        if actor != split_member {
            return Err(SettlementError::NotAParty { actor });
        }
        match current_status {
            SettlementStatus::Pending => Ok(SettlementAction::Request {
                new_status: SettlementStatus::Requested,
                requested_by: actor,
            }),
            _ => Err(SettlementError::InvalidTransition {
                from: current_status,
                to: SettlementStatus::Requested,
            }),
        }
    }

    /// The payer confirms a requested settlement.
    ///
    /// # Arguments
    /// * `current_status` - The split's current status
    /// * `payer` - The member who paid the expense
    /// * `actor` - The user performing the confirmation
    ///
    /// # Returns
    /// * `Ok(SettlementAction::Confirm)` if the transition is valid
    /// * `Err(SettlementError::Forbidden)` if the actor is not the payer
    /// * `Err(SettlementError::InvalidTransition)` if not in Requested status
    pub fn confirm(
        current_status: SettlementStatus,
        payer: UserId,
        actor: UserId,
    ) -> Result<SettlementAction, SettlementError> {
        if actor != payer {
            return Err(SettlementError::Forbidden { actor });
        }
        match current_status {
            SettlementStatus::Requested => Ok(SettlementAction::Confirm {
                new_status: SettlementStatus::Confirmed,
                confirmed_by: actor,
                settled_at: Utc::now(),
            }),
            _ => Err(SettlementError::InvalidTransition {
                from: current_status,
                to: SettlementStatus::Confirmed,
            }),
        }
    }

    /// The payer rejects a requested settlement, returning it to Pending.
    ///
    /// `settled_at` is left unset; the obligation is live again.
    ///
    /// # Returns
    /// * `Ok(SettlementAction::Reject)` if the transition is valid
    /// * `Err(SettlementError::Forbidden)` if the actor is not the payer
    /// * `Err(SettlementError::InvalidTransition)` if not in Requested status
    pub fn reject(
        current_status: SettlementStatus,
        payer: UserId,
        actor: UserId,
    ) -> Result<SettlementAction, SettlementError> {
        if actor != payer {
            return Err(SettlementError::Forbidden { actor });
        }
        match current_status {
            SettlementStatus::Requested => Ok(SettlementAction::Reject {
                new_status: SettlementStatus::Pending,
                rejected_by: actor,
            }),
            _ => Err(SettlementError::InvalidTransition {
                from: current_status,
                to: SettlementStatus::Pending,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Requested (request)
    /// - Requested → Confirmed (confirm)
    /// - Requested → Pending (reject)
    #[must_use]
    pub fn is_valid_transition(from: SettlementStatus, to: SettlementStatus) -> bool {
        matches!(
            (from, to),
            (SettlementStatus::Pending, SettlementStatus::Requested)
                | (
                    SettlementStatus::Requested,
                    SettlementStatus::Confirmed | SettlementStatus::Pending
                )
        )
    }
}
