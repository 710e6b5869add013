//! Debt simplification.
//!
//! Reduces a set of net positions to a short list of pairwise transfers that
//! reproduces the same positions. Greedy matching: repeatedly pay the largest
//! debtor's debt into the largest creditor's claim. Each step zeroes out at
//! least one of the two, so a group with `n` members holding nonzero balances
//! needs at most `n - 1` transfers.
//!
//! Ties on amount break on user id, so the output is deterministic for a
//! given input regardless of insertion order.

use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use splitledger_shared::types::UserId;

use super::types::{MemberBalance, Transfer};

/// Compute a minimal pairwise transfer list for the given net positions.
///
/// The input is expected to sum to zero (as produced by
/// [`super::BalanceService::net_balances`]); members with a zero net are
/// ignored. Applying the returned transfers settles every position: for each
/// member, incoming minus outgoing equals their net.
#[must_use]
pub fn simplify(balances: &[MemberBalance]) -> Vec<Transfer> {
    // Max-heaps keyed by (amount, smallest-id-first tie break).
    let mut creditors: BinaryHeap<(Decimal, Reverse<UserId>)> = BinaryHeap::new();
    let mut debtors: BinaryHeap<(Decimal, Reverse<UserId>)> = BinaryHeap::new();

    for balance in balances {
        if balance.net > Decimal::ZERO {
            creditors.push((balance.net, Reverse(balance.user_id)));
        } else if balance.net < Decimal::ZERO {
            debtors.push((-balance.net, Reverse(balance.user_id)));
        }
    }

    let mut transfers = Vec::new();

    while let (Some((credit, Reverse(creditor))), Some((debt, Reverse(debtor)))) =
        (creditors.pop(), debtors.pop())
    {
        let amount = credit.min(debt);
        transfers.push(Transfer {
            from: debtor,
            to: creditor,
            amount,
        });

        let credit_left = credit - amount;
        if credit_left > Decimal::ZERO {
            creditors.push((credit_left, Reverse(creditor)));
        }
        let debt_left = debt - amount;
        if debt_left > Decimal::ZERO {
            debtors.push((debt_left, Reverse(debtor)));
        }
    }

    transfers
}
