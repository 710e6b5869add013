//! Property tests for the split engine.
//!
//! The one property that must never break: for every accepted input, the
//! per-member amounts plus the payer's self-share sum exactly to the expense
//! amount. No rounding drift, for any strategy.

use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::{Currency, UserId};

use super::allocation::Allocator;
use super::engine::SplitEngine;
use super::error::SplitError;
use super::types::{Allocation, ExactShare, PercentShare, ShareCount};

/// Positive 2dp amounts up to 100,000.00.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_members(count: usize) -> Vec<UserId> {
    (0..count).map(|_| UserId::new()).collect()
}

/// Weight vectors turned into 2dp percentages that sum to exactly 100.
fn percentages_from_weights(weights: &[u32]) -> Vec<Decimal> {
    Allocator::by_shares(Decimal::from(100), weights, 2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_equal_sums_exactly(
        amount in amount_strategy(),
        count in 1usize..12,
    ) {
        let members = make_members(count);
        let result = SplitEngine::compute(
            amount,
            Currency::Inr,
            members[0],
            &members,
            &Allocation::Equal,
        )
        .unwrap();

        prop_assert_eq!(result.total(), amount);
        prop_assert_eq!(result.splits.len(), count - 1);
        for split in &result.splits {
            prop_assert!(split.amount_owed >= Decimal::ZERO);
        }
    }

    #[test]
    fn prop_equal_shares_differ_by_at_most_one_unit(
        amount in amount_strategy(),
        count in 2usize..12,
    ) {
        let members = make_members(count);
        let result = SplitEngine::compute(
            amount,
            Currency::Inr,
            members[0],
            &members,
            &Allocation::Equal,
        )
        .unwrap();

        let mut all: Vec<Decimal> = result.splits.iter().map(|s| s.amount_owed).collect();
        all.push(result.self_share.amount_owed);
        let max = all.iter().max().unwrap();
        let min = all.iter().min().unwrap();
        prop_assert!(*max - *min <= Decimal::new(1, 2));
    }

    #[test]
    fn prop_shares_sum_exactly(
        amount in amount_strategy(),
        counts in prop::collection::vec(1u32..50, 1..8),
    ) {
        let members = make_members(counts.len());
        let allocation = Allocation::Shares(
            members
                .iter()
                .zip(counts.iter())
                .map(|(user, shares)| ShareCount {
                    user_id: *user,
                    shares: *shares,
                })
                .collect(),
        );
        let result =
            SplitEngine::compute(amount, Currency::Inr, members[0], &members, &allocation)
                .unwrap();

        prop_assert_eq!(result.total(), amount);
    }

    #[test]
    fn prop_percentages_sum_exactly(
        amount in amount_strategy(),
        weights in prop::collection::vec(1u32..100, 1..8),
    ) {
        let members = make_members(weights.len());
        let percentages = percentages_from_weights(&weights);
        let allocation = Allocation::Percentage(
            members
                .iter()
                .zip(percentages.iter())
                .map(|(user, pct)| PercentShare {
                    user_id: *user,
                    percentage: *pct,
                })
                .collect(),
        );
        let result =
            SplitEngine::compute(amount, Currency::Inr, members[0], &members, &allocation)
                .unwrap();

        prop_assert_eq!(result.total(), amount);
    }

    #[test]
    fn prop_exact_mismatch_always_fails(
        amount in amount_strategy(),
        delta_cents in -10_000i64..10_000i64,
    ) {
        prop_assume!(delta_cents != 0);
        let supplied = amount + Decimal::new(delta_cents, 2);
        prop_assume!(supplied >= Decimal::ZERO);

        let members = make_members(2);
        let allocation = Allocation::Exact(vec![ExactShare {
            user_id: members[1],
            amount_owed: supplied,
        }]);
        let result =
            SplitEngine::compute(amount, Currency::Inr, members[0], &members, &allocation);

        let is_mismatch = matches!(
            result,
            Err(SplitError::AllocationMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }
}
