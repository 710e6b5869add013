//! Outbound notification event types.
//!
//! Events carry only primitive fields; the delivery collaborator resolves
//! addresses, renders templates, and owns retries. The core never learns
//! whether delivery happened.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{Currency, ExpenseId, UserId};

/// A one-shot outbound event for the messaging collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// The payer's personal spending crossed their monthly budget.
    BudgetExceeded {
        /// The user over budget.
        user_id: UserId,
        /// Total spend for the month, including the share just recorded.
        total: Decimal,
        /// The configured monthly budget.
        budget: Decimal,
    },
    /// A debtor asked the payer to settle an obligation.
    SettlementRequested {
        /// The originating expense.
        expense_id: ExpenseId,
        /// The member who owes.
        debtor: UserId,
        /// The member who paid and will receive the money.
        payer: UserId,
        /// The amount owed.
        amount: Decimal,
        /// The currency of the amount.
        currency: Currency,
        /// The payer's payment identifier (e.g. a UPI handle), when known.
        payer_payment_id: Option<String>,
        /// Human-readable reference for the payment.
        payment_reference: String,
    },
    /// The payer confirmed an obligation as settled.
    SettlementConfirmed {
        /// The originating expense.
        expense_id: ExpenseId,
        /// The member whose debt was settled.
        debtor: UserId,
        /// The member who confirmed.
        payer: UserId,
        /// The settled amount.
        amount: Decimal,
        /// The currency of the amount.
        currency: Currency,
    },
}

/// The settlement transitions that emit a notification.
///
/// Used as part of the outbox key so each qualifying transition dispatches
/// at most once per (expense, member).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// A settlement request was raised.
    Requested,
    /// A settlement was confirmed.
    Confirmed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_notification_serializes_with_kind_tag() {
        let event = Notification::BudgetExceeded {
            user_id: UserId::new(),
            total: dec!(5200),
            budget: dec!(5000),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["kind"], "budget_exceeded");
        assert_eq!(value["total"], "5200");
    }
}
