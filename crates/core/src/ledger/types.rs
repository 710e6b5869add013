//! Ledger operation inputs and read views.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, GroupId, Money, UserId};

use crate::expense::{GroupExpense, SelfShareExpense, Split};
use crate::settlement::SettlementStatus;

/// Result of recording a group expense: the expense, its interpersonal
/// splits, and the payer's self-share for the personal-expense collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreated {
    /// The recorded expense.
    pub expense: GroupExpense,
    /// The obligations recorded against the other members.
    pub splits: Vec<Split>,
    /// The payer's own share, excluded from interpersonal debt.
    pub self_share: SelfShareExpense,
}

/// An expense with its splits, as read from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseWithSplits {
    /// The expense.
    pub expense: GroupExpense,
    /// Its splits.
    pub splits: Vec<Split>,
}

/// One outstanding obligation, seen from one user's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtEntry {
    /// The originating expense.
    pub expense_id: ExpenseId,
    /// The group the expense belongs to.
    pub group_id: GroupId,
    /// The expense description.
    pub description: String,
    /// The member on the other side of the debt.
    pub counterparty: UserId,
    /// The amount owed, in the group's currency.
    pub amount: Money,
    /// The expense date.
    pub date: NaiveDate,
    /// Where the obligation sits in the settlement workflow.
    pub status: SettlementStatus,
}

/// Everything one user owes and is owed across all groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberPosition {
    /// Obligations where the user is the debtor.
    pub owes: Vec<DebtEntry>,
    /// Obligations owed to the user as payer.
    pub owed_to: Vec<DebtEntry>,
}

/// Input for recording a direct member-to-member payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSettlementInput {
    /// The group the payment belongs to.
    pub group_id: GroupId,
    /// Who paid.
    pub from_user: UserId,
    /// Who received.
    pub to_user: UserId,
    /// The amount transferred.
    pub amount: Decimal,
    /// Free-form payment method label.
    pub payment_method: Option<String>,
    /// External transaction reference.
    pub transaction_reference: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}
