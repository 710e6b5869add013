//! Net balance aggregation.
//!
//! Walks a group's unsettled obligations and nets them into one signed
//! position per member. Confirmed splits have left the picture; everything
//! else still counts, including splits whose settlement is merely requested.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use splitledger_shared::types::UserId;

use super::types::MemberBalance;
use crate::expense::Split;
use crate::settlement::SettlementStatus;

/// Stateless balance aggregation service.
pub struct BalanceService;

impl BalanceService {
    /// Compute each member's signed net position.
    ///
    /// `splits` pairs every split with the payer of its expense. Every member
    /// in `members` appears in the output, zero when nothing is outstanding.
    /// The output is ordered by member id and its nets always sum to zero:
    /// each unsettled split adds to the payer what it subtracts from the
    /// debtor.
    #[must_use]
    pub fn net_balances<'a>(
        members: &[UserId],
        splits: impl IntoIterator<Item = (UserId, &'a Split)>,
    ) -> Vec<MemberBalance> {
        let mut nets: BTreeMap<UserId, Decimal> =
            members.iter().map(|m| (*m, Decimal::ZERO)).collect();

        for (payer, split) in splits {
            if split.status == SettlementStatus::Confirmed {
                continue;
            }
            *nets.entry(payer).or_default() += split.amount_owed;
            *nets.entry(split.user_id).or_default() -= split.amount_owed;
        }

        nets.into_iter()
            .map(|(user_id, net)| MemberBalance { user_id, net })
            .collect()
    }
}
