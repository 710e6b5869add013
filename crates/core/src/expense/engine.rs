//! Split calculation engine.
//!
//! Turns one paid expense into a validated set of per-member obligations.
//! The engine is pure: it never touches storage, and its output either sums
//! exactly to the expense amount or the whole computation is rejected.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use splitledger_shared::types::{Currency, UserId};

use super::allocation::Allocator;
use super::error::SplitError;
use super::types::{Allocation, ComputedSplit, ComputedSplits};

/// Stateless engine computing per-member obligations for an expense.
pub struct SplitEngine;

impl SplitEngine {
    /// Compute the splits for an expense.
    ///
    /// `members` is the group's member list in join order; the remainder of
    /// an EQUAL division lands on the earliest-joined members. For the other
    /// strategies the allocation entries decide who participates; every entry
    /// must reference a listed member.
    ///
    /// The payer's share is computed like anyone else's but is returned
    /// separately as `self_share` and never becomes an interpersonal debt.
    ///
    /// # Errors
    ///
    /// Returns `SplitError` if the amount, member list, or allocation input
    /// is invalid, or if EXACT/PERCENTAGE inputs do not sum correctly.
    pub fn compute(
        amount: Decimal,
        currency: Currency,
        payer: UserId,
        members: &[UserId],
        allocation: &Allocation,
    ) -> Result<ComputedSplits, SplitError> {
        let places = currency.decimal_places();

        if amount <= Decimal::ZERO {
            return Err(SplitError::NonPositiveAmount(amount));
        }
        Self::check_precision(amount, places)?;
        if members.is_empty() {
            return Err(SplitError::NoMembers);
        }
        for (i, user) in members.iter().enumerate() {
            if members[..i].contains(user) {
                return Err(SplitError::InvalidAllocation(format!(
                    "member {user} appears twice in the member list"
                )));
            }
        }
        if !members.contains(&payer) {
            return Err(SplitError::PayerNotListed(payer));
        }

        let entries = match allocation {
            Allocation::Equal => {
                let amounts = Allocator::equal(amount, members.len(), places);
                members
                    .iter()
                    .zip(amounts)
                    .map(|(user, owed)| ComputedSplit {
                        user_id: *user,
                        amount_owed: owed,
                        percentage: None,
                        shares: None,
                    })
                    .collect()
            }
            Allocation::Exact(shares) => {
                Self::check_participants(shares.iter().map(|s| s.user_id), members)?;
                let mut actual = Decimal::ZERO;
                for share in shares {
                    if share.amount_owed < Decimal::ZERO {
                        return Err(SplitError::InvalidAllocation(format!(
                            "amount for member {} must not be negative",
                            share.user_id
                        )));
                    }
                    Self::check_precision(share.amount_owed, places)?;
                    actual += share.amount_owed;
                }
                if actual != amount {
                    return Err(SplitError::AllocationMismatch {
                        expected: amount,
                        actual,
                    });
                }
                shares
                    .iter()
                    .map(|s| ComputedSplit {
                        user_id: s.user_id,
                        amount_owed: s.amount_owed,
                        percentage: None,
                        shares: None,
                    })
                    .collect()
            }
            Allocation::Percentage(shares) => {
                Self::check_participants(shares.iter().map(|s| s.user_id), members)?;
                let mut actual = Decimal::ZERO;
                for share in shares {
                    if share.percentage < Decimal::ZERO
                        || share.percentage > Decimal::from(100)
                    {
                        return Err(SplitError::InvalidAllocation(format!(
                            "percentage for member {} must be between 0 and 100",
                            share.user_id
                        )));
                    }
                    Self::check_precision(share.percentage, 2)?;
                    actual += share.percentage;
                }
                if actual != Decimal::from(100) {
                    return Err(SplitError::AllocationMismatch {
                        expected: Decimal::from(100),
                        actual,
                    });
                }
                let percentages: Vec<Decimal> =
                    shares.iter().map(|s| s.percentage).collect();
                let amounts = Allocator::by_percentages(amount, &percentages, places);
                shares
                    .iter()
                    .zip(amounts)
                    .map(|(s, owed)| ComputedSplit {
                        user_id: s.user_id,
                        amount_owed: owed,
                        percentage: Some(s.percentage),
                        shares: None,
                    })
                    .collect()
            }
            Allocation::Shares(shares) => {
                Self::check_participants(shares.iter().map(|s| s.user_id), members)?;
                for share in shares {
                    if share.shares == 0 {
                        return Err(SplitError::InvalidAllocation(format!(
                            "share count for member {} must be positive",
                            share.user_id
                        )));
                    }
                }
                let counts: Vec<u32> = shares.iter().map(|s| s.shares).collect();
                if counts.iter().map(|s| u64::from(*s)).sum::<u64>() == 0 {
                    return Err(SplitError::InvalidAllocation(
                        "total shares must be positive".to_string(),
                    ));
                }
                let amounts = Allocator::by_shares(amount, &counts, places);
                shares
                    .iter()
                    .zip(amounts)
                    .map(|(s, owed)| ComputedSplit {
                        user_id: s.user_id,
                        amount_owed: owed,
                        percentage: None,
                        shares: Some(s.shares),
                    })
                    .collect()
            }
        };

        let computed = Self::partition_self_share(entries, payer);
        debug_assert_eq!(computed.total(), amount);
        Ok(computed)
    }

    /// Pull the payer's entry out of the split set.
    ///
    /// When the payer does not participate in the allocation (possible for
    /// EXACT/PERCENTAGE/SHARES) the self-share is zero.
    fn partition_self_share(entries: Vec<ComputedSplit>, payer: UserId) -> ComputedSplits {
        let mut splits = Vec::with_capacity(entries.len());
        let mut self_share = ComputedSplit {
            user_id: payer,
            amount_owed: Decimal::ZERO,
            percentage: None,
            shares: None,
        };
        for entry in entries {
            if entry.user_id == payer {
                self_share = entry;
            } else {
                splits.push(entry);
            }
        }
        ComputedSplits { splits, self_share }
    }

    /// Validate that allocation entries reference distinct, listed members.
    fn check_participants(
        participants: impl Iterator<Item = UserId>,
        members: &[UserId],
    ) -> Result<(), SplitError> {
        let mut seen: Vec<UserId> = Vec::new();
        for user in participants {
            if !members.contains(&user) {
                return Err(SplitError::InvalidAllocation(format!(
                    "user {user} is not a member of this group"
                )));
            }
            if seen.contains(&user) {
                return Err(SplitError::InvalidAllocation(format!(
                    "user {user} is listed more than once"
                )));
            }
            seen.push(user);
        }
        if seen.is_empty() {
            return Err(SplitError::InvalidAllocation(
                "allocation lists no members".to_string(),
            ));
        }
        Ok(())
    }

    /// Reject values carrying more fraction digits than the currency allows.
    fn check_precision(value: Decimal, places: u32) -> Result<(), SplitError> {
        if value.round_dp_with_strategy(places, RoundingStrategy::ToZero) != value {
            return Err(SplitError::AmountPrecision {
                amount: value,
                max_places: places,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::types::{ExactShare, PercentShare, ShareCount};
    use rust_decimal_macros::dec;

    fn three_members() -> (UserId, UserId, UserId) {
        (UserId::new(), UserId::new(), UserId::new())
    }

    #[test]
    fn test_equal_three_way() {
        let (a, b, c) = three_members();
        let result =
            SplitEngine::compute(dec!(300), Currency::Inr, a, &[a, b, c], &Allocation::Equal)
                .unwrap();

        assert_eq!(result.self_share.user_id, a);
        assert_eq!(result.self_share.amount_owed, dec!(100.00));
        assert_eq!(result.splits.len(), 2);
        assert!(result.splits.iter().all(|s| s.amount_owed == dec!(100.00)));
        assert_eq!(result.total(), dec!(300));
    }

    #[test]
    fn test_equal_distributes_remainder_to_earliest_members() {
        let (a, b, c) = three_members();
        let result =
            SplitEngine::compute(dec!(100), Currency::Inr, c, &[a, b, c], &Allocation::Equal)
                .unwrap();

        // a joined first and absorbs the extra cent; c is the payer.
        assert_eq!(result.splits[0].user_id, a);
        assert_eq!(result.splits[0].amount_owed, dec!(33.34));
        assert_eq!(result.splits[1].amount_owed, dec!(33.33));
        assert_eq!(result.self_share.amount_owed, dec!(33.33));
        assert_eq!(result.total(), dec!(100));
    }

    #[test]
    fn test_exact_valid() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Exact(vec![
            ExactShare {
                user_id: a,
                amount_owed: dec!(120),
            },
            ExactShare {
                user_id: b,
                amount_owed: dec!(80),
            },
        ]);
        let result =
            SplitEngine::compute(dec!(200), Currency::Inr, a, &[a, b], &allocation).unwrap();

        assert_eq!(result.self_share.amount_owed, dec!(120));
        assert_eq!(result.splits.len(), 1);
        assert_eq!(result.splits[0].user_id, b);
        assert_eq!(result.splits[0].amount_owed, dec!(80));
    }

    #[test]
    fn test_exact_mismatch() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Exact(vec![
            ExactShare {
                user_id: a,
                amount_owed: dec!(120),
            },
            ExactShare {
                user_id: b,
                amount_owed: dec!(80),
            },
        ]);
        let result = SplitEngine::compute(dec!(199), Currency::Inr, a, &[a, b], &allocation);

        assert!(matches!(
            result,
            Err(SplitError::AllocationMismatch { expected, actual })
                if expected == dec!(199) && actual == dec!(200)
        ));
    }

    #[test]
    fn test_exact_mismatch_under() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Exact(vec![
            ExactShare {
                user_id: a,
                amount_owed: dec!(120),
            },
            ExactShare {
                user_id: b,
                amount_owed: dec!(80),
            },
        ]);
        let result = SplitEngine::compute(dec!(200.01), Currency::Inr, a, &[a, b], &allocation);
        assert!(matches!(result, Err(SplitError::AllocationMismatch { .. })));
    }

    #[test]
    fn test_exact_rejects_negative_amount() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Exact(vec![
            ExactShare {
                user_id: a,
                amount_owed: dec!(210),
            },
            ExactShare {
                user_id: b,
                amount_owed: dec!(-10),
            },
        ]);
        let result = SplitEngine::compute(dec!(200), Currency::Inr, a, &[a, b], &allocation);
        assert!(matches!(result, Err(SplitError::InvalidAllocation(_))));
    }

    #[test]
    fn test_exact_payer_not_participating_gets_zero_self_share() {
        let (a, b, c) = three_members();
        let allocation = Allocation::Exact(vec![
            ExactShare {
                user_id: b,
                amount_owed: dec!(150),
            },
            ExactShare {
                user_id: c,
                amount_owed: dec!(50),
            },
        ]);
        let result =
            SplitEngine::compute(dec!(200), Currency::Inr, a, &[a, b, c], &allocation).unwrap();

        assert_eq!(result.self_share.user_id, a);
        assert!(result.self_share.amount_owed.is_zero());
        assert_eq!(result.splits.len(), 2);
        assert_eq!(result.total(), dec!(200));
    }

    #[test]
    fn test_percentage_valid_retains_percentages() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Percentage(vec![
            PercentShare {
                user_id: a,
                percentage: dec!(60),
            },
            PercentShare {
                user_id: b,
                percentage: dec!(40),
            },
        ]);
        let result =
            SplitEngine::compute(dec!(250), Currency::Inr, a, &[a, b], &allocation).unwrap();

        assert_eq!(result.self_share.amount_owed, dec!(150.00));
        assert_eq!(result.self_share.percentage, Some(dec!(60)));
        assert_eq!(result.splits[0].amount_owed, dec!(100.00));
        assert_eq!(result.splits[0].percentage, Some(dec!(40)));
    }

    #[test]
    fn test_percentage_must_sum_to_hundred() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Percentage(vec![
            PercentShare {
                user_id: a,
                percentage: dec!(60),
            },
            PercentShare {
                user_id: b,
                percentage: dec!(39.99),
            },
        ]);
        let result = SplitEngine::compute(dec!(100), Currency::Inr, a, &[a, b], &allocation);

        assert!(matches!(
            result,
            Err(SplitError::AllocationMismatch { expected, actual })
                if expected == dec!(100) && actual == dec!(99.99)
        ));
    }

    #[test]
    fn test_percentage_out_of_range() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Percentage(vec![
            PercentShare {
                user_id: a,
                percentage: dec!(150),
            },
            PercentShare {
                user_id: b,
                percentage: dec!(-50),
            },
        ]);
        let result = SplitEngine::compute(dec!(100), Currency::Inr, a, &[a, b], &allocation);
        assert!(matches!(result, Err(SplitError::InvalidAllocation(_))));
    }

    #[test]
    fn test_shares_proportional() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Shares(vec![
            ShareCount { user_id: a, shares: 1 },
            ShareCount { user_id: b, shares: 2 },
        ]);
        let result =
            SplitEngine::compute(dec!(90), Currency::Inr, a, &[a, b], &allocation).unwrap();

        assert_eq!(result.self_share.amount_owed, dec!(30.00));
        assert_eq!(result.self_share.shares, Some(1));
        assert_eq!(result.splits[0].amount_owed, dec!(60.00));
        assert_eq!(result.splits[0].shares, Some(2));
    }

    #[test]
    fn test_shares_zero_count_rejected() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Shares(vec![
            ShareCount { user_id: a, shares: 0 },
            ShareCount { user_id: b, shares: 0 },
        ]);
        let result = SplitEngine::compute(dec!(90), Currency::Inr, a, &[a, b], &allocation);
        assert!(matches!(result, Err(SplitError::InvalidAllocation(_))));
    }

    #[test]
    fn test_unknown_member_rejected() {
        let (a, b, _) = three_members();
        let stranger = UserId::new();
        let allocation = Allocation::Exact(vec![
            ExactShare {
                user_id: a,
                amount_owed: dec!(100),
            },
            ExactShare {
                user_id: stranger,
                amount_owed: dec!(100),
            },
        ]);
        let result = SplitEngine::compute(dec!(200), Currency::Inr, a, &[a, b], &allocation);
        assert!(matches!(result, Err(SplitError::InvalidAllocation(_))));
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Exact(vec![
            ExactShare {
                user_id: b,
                amount_owed: dec!(100),
            },
            ExactShare {
                user_id: b,
                amount_owed: dec!(100),
            },
        ]);
        let result = SplitEngine::compute(dec!(200), Currency::Inr, a, &[a, b], &allocation);
        assert!(matches!(result, Err(SplitError::InvalidAllocation(_))));
    }

    #[test]
    fn test_empty_allocation_rejected() {
        let (a, b, _) = three_members();
        let allocation = Allocation::Exact(vec![]);
        let result = SplitEngine::compute(dec!(200), Currency::Inr, a, &[a, b], &allocation);
        assert!(matches!(result, Err(SplitError::InvalidAllocation(_))));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (a, b, _) = three_members();
        for amount in [dec!(0), dec!(-10)] {
            let result =
                SplitEngine::compute(amount, Currency::Inr, a, &[a, b], &Allocation::Equal);
            assert!(matches!(result, Err(SplitError::NonPositiveAmount(_))));
        }
    }

    #[test]
    fn test_amount_precision_rejected() {
        let (a, b, _) = three_members();
        let result = SplitEngine::compute(
            dec!(10.999),
            Currency::Inr,
            a,
            &[a, b],
            &Allocation::Equal,
        );
        assert!(matches!(result, Err(SplitError::AmountPrecision { .. })));
    }

    #[test]
    fn test_empty_member_list_rejected() {
        let a = UserId::new();
        let result = SplitEngine::compute(dec!(100), Currency::Inr, a, &[], &Allocation::Equal);
        assert!(matches!(result, Err(SplitError::NoMembers)));
    }

    #[test]
    fn test_payer_outside_group_rejected() {
        let (a, b, _) = three_members();
        let outsider = UserId::new();
        let result =
            SplitEngine::compute(dec!(100), Currency::Inr, outsider, &[a, b], &Allocation::Equal);
        assert!(matches!(result, Err(SplitError::PayerNotListed(_))));
    }

    #[test]
    fn test_yen_splits_in_whole_units() {
        let (a, b, c) = three_members();
        let result =
            SplitEngine::compute(dec!(100), Currency::Jpy, a, &[a, b, c], &Allocation::Equal)
                .unwrap();

        assert_eq!(result.self_share.amount_owed, dec!(34));
        assert!(result.splits.iter().all(|s| s.amount_owed == dec!(33)));
        assert_eq!(result.total(), dec!(100));
    }
}
