//! Fire-and-forget notification dispatch.
//!
//! The core pushes events onto an unbounded channel and moves on. Delivery
//! (email, push, whatever) is the consumer's problem; a closed channel is
//! logged and absorbed, never surfaced to the caller mid-transaction.

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::warn;

use splitledger_shared::config::NotificationConfig;
use splitledger_shared::types::{Currency, ExpenseId, UserId};

use super::outbox::NotificationOutbox;
use super::types::{Notification, TransitionKind};

/// Outbound notification dispatcher.
///
/// Settlement events are gated through the outbox so each qualifying
/// transition emits at most once; budget alerts are at-least-once and bypass
/// it.
#[derive(Debug)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
    outbox: NotificationOutbox,
    config: NotificationConfig,
}

impl Notifier {
    /// Creates a notifier and the receiving end of its event channel.
    ///
    /// The receiver belongs to the messaging collaborator; dropping it does
    /// not break the core, it just turns dispatch into a logged no-op.
    #[must_use]
    pub fn channel(config: NotificationConfig) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                outbox: NotificationOutbox::new(),
                config,
            },
            rx,
        )
    }

    /// Dispatch a budget-exceeded alert for a user.
    pub fn budget_exceeded(&self, user_id: UserId, total: Decimal, budget: Decimal) {
        self.dispatch(Notification::BudgetExceeded {
            user_id,
            total,
            budget,
        });
    }

    /// Dispatch a settlement-request event, once per (expense, debtor).
    pub fn settlement_requested(
        &self,
        expense_id: ExpenseId,
        debtor: UserId,
        payer: UserId,
        amount: Decimal,
        currency: Currency,
        payer_payment_id: Option<String>,
    ) {
        if !self
            .outbox
            .first_dispatch(expense_id, debtor, TransitionKind::Requested)
        {
            return;
        }
        let payment_reference = format!(
            "{}-{}",
            self.config.payment_reference_prefix,
            Utc::now().format("%Y%m%d")
        );
        self.dispatch(Notification::SettlementRequested {
            expense_id,
            debtor,
            payer,
            amount,
            currency,
            payer_payment_id,
            payment_reference,
        });
    }

    /// Dispatch a settlement-confirmed event, once per (expense, debtor).
    pub fn settlement_confirmed(
        &self,
        expense_id: ExpenseId,
        debtor: UserId,
        payer: UserId,
        amount: Decimal,
        currency: Currency,
    ) {
        if !self
            .outbox
            .first_dispatch(expense_id, debtor, TransitionKind::Confirmed)
        {
            return;
        }
        self.dispatch(Notification::SettlementConfirmed {
            expense_id,
            debtor,
            payer,
            amount,
            currency,
        });
    }

    /// Record a rejection: the request slot reopens so a later re-request
    /// notifies the payer again.
    pub fn settlement_rejected(&self, expense_id: ExpenseId, debtor: UserId) {
        self.outbox
            .reopen(expense_id, debtor, TransitionKind::Requested);
    }

    fn dispatch(&self, event: Notification) {
        if let Err(err) = self.tx.send(event) {
            warn!(event = ?err.0, "notification channel closed, event dropped");
        }
    }
}
