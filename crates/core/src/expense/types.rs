//! Expense domain types for split creation and validation.
//!
//! This module defines the types used for recording group expenses and the
//! strategy-specific allocation inputs the split engine consumes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, GroupId, UserId};

use crate::settlement::SettlementStatus;

/// Spending category, mirrored onto the payer's self-share record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Food and dining.
    Food,
    /// Travel and commuting.
    Transport,
    /// Movies, events, outings.
    Entertainment,
    /// Medical and fitness.
    Health,
    /// Retail purchases.
    Shopping,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }

    /// Parses a category from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "entertainment" => Some(Self::Entertainment),
            "health" => Some(Self::Health),
            "shopping" => Some(Self::Shopping),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        Self::Other
    }
}

/// How the payer settled the bill with the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Debit or credit card.
    Card,
    /// UPI transfer.
    Upi,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Returns the string representation of the payment method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Upi => "upi",
            Self::Other => "other",
        }
    }
}

/// The allocation rule used to divide an expense among members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitStrategy {
    /// Every listed member owes the same share.
    Equal,
    /// The caller supplies exact amounts per member.
    Exact,
    /// The caller supplies percentages summing to 100.
    Percentage,
    /// The caller supplies integer share counts.
    Shares,
}

impl SplitStrategy {
    /// Returns the string representation of the strategy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::Exact => "EXACT",
            Self::Percentage => "PERCENTAGE",
            Self::Shares => "SHARES",
        }
    }

    /// Parses a strategy from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EQUAL" => Some(Self::Equal),
            "EXACT" => Some(Self::Exact),
            "PERCENTAGE" => Some(Self::Percentage),
            "SHARES" => Some(Self::Shares),
            _ => None,
        }
    }
}

impl std::fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An exact amount owed by one member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactShare {
    /// The member who owes.
    pub user_id: UserId,
    /// The exact amount owed.
    pub amount_owed: Decimal,
}

/// A percentage of the total owed by one member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentShare {
    /// The member who owes.
    pub user_id: UserId,
    /// Percentage of the total (0-100, up to 2 fraction digits).
    pub percentage: Decimal,
}

/// An integer share count for one member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareCount {
    /// The member who owes.
    pub user_id: UserId,
    /// Number of shares (positive).
    pub shares: u32,
}

/// Strategy-specific allocation input, keyed by strategy.
///
/// Each strategy's required fields are enforced by construction; there is no
/// open-ended map of optional per-member values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "splits")]
#[serde(rename_all = "UPPERCASE")]
pub enum Allocation {
    /// Divide equally across all group members.
    Equal,
    /// Exact amounts per participating member.
    Exact(Vec<ExactShare>),
    /// Percentages per participating member, summing to 100.
    Percentage(Vec<PercentShare>),
    /// Share counts per participating member.
    Shares(Vec<ShareCount>),
}

impl Allocation {
    /// The strategy tag this allocation carries.
    #[must_use]
    pub const fn strategy(&self) -> SplitStrategy {
        match self {
            Self::Equal => SplitStrategy::Equal,
            Self::Exact(_) => SplitStrategy::Exact,
            Self::Percentage(_) => SplitStrategy::Percentage,
            Self::Shares(_) => SplitStrategy::Shares,
        }
    }
}

/// A recorded expense paid by one member on behalf of the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupExpense {
    /// Unique identifier for the expense.
    pub id: ExpenseId,
    /// The owning group.
    pub group_id: GroupId,
    /// The member who paid.
    pub paid_by: UserId,
    /// Total amount paid (positive, group currency).
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// The day the expense happened.
    pub date: NaiveDate,
    /// Spending category.
    pub category: ExpenseCategory,
    /// How the payer paid.
    pub payment_method: PaymentMethod,
    /// The allocation rule used to split it.
    pub strategy: SplitStrategy,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// One member's obligation on one expense.
///
/// Unique per (expense, member). Never deleted; only `status` and
/// `settled_at` change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Split {
    /// The expense this obligation belongs to.
    pub expense_id: ExpenseId,
    /// The member who owes.
    pub user_id: UserId,
    /// The amount owed to the payer.
    pub amount_owed: Decimal,
    /// The percentage used, when the strategy was PERCENTAGE.
    pub percentage: Option<Decimal>,
    /// The share count used, when the strategy was SHARES.
    pub shares: Option<u32>,
    /// Where the obligation sits in the settlement workflow.
    pub status: SettlementStatus,
    /// When the obligation was confirmed settled.
    pub settled_at: Option<DateTime<Utc>>,
}

/// Input for recording a new group expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseInput {
    /// The owning group.
    pub group_id: GroupId,
    /// The member who paid.
    pub paid_by: UserId,
    /// Total amount paid.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// The day the expense happened.
    pub date: NaiveDate,
    /// Spending category.
    #[serde(default)]
    pub category: ExpenseCategory,
    /// How the payer paid.
    pub payment_method: PaymentMethod,
    /// Strategy-specific allocation input.
    pub allocation: Allocation,
}

/// One computed per-member obligation, before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedSplit {
    /// The member who owes.
    pub user_id: UserId,
    /// The amount owed.
    pub amount_owed: Decimal,
    /// The percentage used, when the strategy was PERCENTAGE.
    pub percentage: Option<Decimal>,
    /// The share count used, when the strategy was SHARES.
    pub shares: Option<u32>,
}

/// The split engine's output: interpersonal obligations plus the payer's own
/// share, which never enters the group ledger.
#[derive(Debug, Clone)]
pub struct ComputedSplits {
    /// Obligations for every participating member except the payer.
    pub splits: Vec<ComputedSplit>,
    /// The payer's own share of the expense.
    pub self_share: ComputedSplit,
}

impl ComputedSplits {
    /// Sum of all obligations including the payer's own share.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.splits
            .iter()
            .map(|s| s.amount_owed)
            .sum::<Decimal>()
            + self.self_share.amount_owed
    }
}

/// The payer's own share, emitted for the personal-expense collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfShareExpense {
    /// The payer.
    pub user_id: UserId,
    /// The payer's share of the expense.
    pub amount: Decimal,
    /// Category carried over from the group expense.
    pub category: ExpenseCategory,
    /// Date carried over from the group expense.
    pub date: NaiveDate,
    /// Payment method carried over from the group expense.
    pub payment_method: PaymentMethod,
    /// The originating group expense.
    pub source_expense: ExpenseId,
}
