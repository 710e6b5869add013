//! Fixed-point amount allocation.
//!
//! Splitting money across members must never lose or invent a cent: the sum
//! of the allocated amounts has to equal the original total exactly. All
//! functions here use the Largest Remainder Method:
//!
//! 1. Compute each exact (unrounded) allocation
//! 2. Round every allocation down to the currency unit
//! 3. Hand the leftover units out one at a time, largest fractional part first

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Allocation routines for dividing expense amounts.
pub struct Allocator;

impl Allocator {
    /// Divide `total` equally across `count` members.
    ///
    /// Leftover currency units go to the first-listed members, so the result
    /// is deterministic for a given member order and always sums to `total`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use splitledger_core::expense::Allocator;
    ///
    /// // 100 / 3 = [33.34, 33.33, 33.33]
    /// let shares = Allocator::equal(dec!(100), 3, 2);
    /// assert_eq!(shares.iter().sum::<rust_decimal::Decimal>(), dec!(100));
    /// ```
    #[must_use]
    pub fn equal(total: Decimal, count: usize, decimal_places: u32) -> Vec<Decimal> {
        if count == 0 {
            return vec![];
        }

        let unit = Decimal::new(1, decimal_places);
        let count_dec = Decimal::from(count as u64);

        let base = (total / count_dec)
            .round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero);
        let remainder = total - base * count_dec;

        let extra_units = (remainder / unit)
            .round_dp_with_strategy(0, RoundingStrategy::ToZero)
            .to_u64()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);

        (0..count)
            .map(|i| if i < extra_units { base + unit } else { base })
            .collect()
    }

    /// Divide `total` by percentage weights (expected to sum to 100).
    ///
    /// The percentage sum is validated by the caller; this function only
    /// guarantees that whatever weights it receives produce amounts summing
    /// to `total`.
    #[must_use]
    pub fn by_percentages(
        total: Decimal,
        percentages: &[Decimal],
        decimal_places: u32,
    ) -> Vec<Decimal> {
        let hundred = Decimal::from(100);
        let exact: Vec<Decimal> = percentages.iter().map(|p| total * *p / hundred).collect();
        Self::round_preserving_total(total, &exact, decimal_places)
    }

    /// Divide `total` proportionally to integer share counts.
    ///
    /// The caller guarantees `shares` is non-empty with a positive total.
    #[must_use]
    pub fn by_shares(total: Decimal, shares: &[u32], decimal_places: u32) -> Vec<Decimal> {
        let total_shares: u64 = shares.iter().map(|s| u64::from(*s)).sum();
        if total_shares == 0 {
            return vec![];
        }
        let total_shares = Decimal::from(total_shares);

        let exact: Vec<Decimal> = shares
            .iter()
            .map(|s| total * Decimal::from(*s) / total_shares)
            .collect();
        Self::round_preserving_total(total, &exact, decimal_places)
    }

    /// Round each exact allocation down, then distribute the leftover units
    /// to the entries with the largest fractional parts.
    fn round_preserving_total(
        total: Decimal,
        exact: &[Decimal],
        decimal_places: u32,
    ) -> Vec<Decimal> {
        if exact.is_empty() {
            return vec![];
        }

        let unit = Decimal::new(1, decimal_places);

        let mut rounded: Vec<Decimal> = exact
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
            .collect();

        let allocated: Decimal = rounded.iter().copied().sum();
        let leftover_units = ((total - allocated) / unit)
            .round_dp_with_strategy(0, RoundingStrategy::ToZero)
            .to_u64()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);

        if leftover_units == 0 {
            return rounded;
        }

        // Largest fractional part first; index breaks ties so the order is stable.
        let mut by_fraction: Vec<(usize, Decimal)> = exact
            .iter()
            .zip(rounded.iter())
            .enumerate()
            .map(|(i, (e, r))| (i, *e - *r))
            .collect();
        by_fraction.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        for (idx, _) in by_fraction.iter().take(leftover_units) {
            rounded[*idx] += unit;
        }

        rounded
    }
}
