//! Dispatch outbox for settlement notifications.
//!
//! A qualifying transition must notify exactly once per (expense, member,
//! transition). The outbox records what has been dispatched as an explicit
//! keyed set rather than ambient flag state, so a retried call after a
//! transport hiccup cannot double-send.

use dashmap::DashSet;
use splitledger_shared::types::{ExpenseId, UserId};

use super::types::TransitionKind;

/// Keyed record of already-dispatched settlement notifications.
#[derive(Debug, Default)]
pub struct NotificationOutbox {
    sent: DashSet<(ExpenseId, UserId, TransitionKind)>,
}

impl NotificationOutbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the dispatch slot for a transition.
    ///
    /// Returns `true` the first time a given (expense, member, transition)
    /// is seen; `false` on every later attempt.
    pub fn first_dispatch(
        &self,
        expense_id: ExpenseId,
        member_id: UserId,
        transition: TransitionKind,
    ) -> bool {
        self.sent.insert((expense_id, member_id, transition))
    }

    /// Reopens a dispatch slot.
    ///
    /// Called when a rejection returns an obligation to Pending: the next
    /// settlement request is a fresh transition and must notify again.
    pub fn reopen(&self, expense_id: ExpenseId, member_id: UserId, transition: TransitionKind) {
        self.sent.remove(&(expense_id, member_id, transition));
    }
}
