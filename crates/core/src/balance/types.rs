//! Balance domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{Currency, GroupId, UserId};

/// One member's signed net position within a group.
///
/// Positive: others owe this member. Negative: this member owes others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// The member.
    pub user_id: UserId,
    /// The signed net amount.
    pub net: Decimal,
}

/// A single suggested repayment between two members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Who pays.
    pub from: UserId,
    /// Who receives.
    pub to: UserId,
    /// How much.
    pub amount: Decimal,
}

/// The full balance picture for one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupBalances {
    /// The group.
    pub group_id: GroupId,
    /// The group currency all amounts are denominated in.
    pub currency: Currency,
    /// Net position per member, every member listed.
    pub balances: Vec<MemberBalance>,
    /// A minimal transfer list reproducing the same net positions.
    pub transfers: Vec<Transfer>,
}
