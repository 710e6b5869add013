//! External user-profile collaborator boundary.
//!
//! Payment identifiers, personal spend totals, and monthly budgets live in
//! the surrounding application, not in the ledger. The ledger consumes them
//! through this trait and treats every answer as optional.

use rust_decimal::Decimal;
use splitledger_shared::types::UserId;

/// Read-only access to user profile data owned by an external collaborator.
pub trait ProfileDirectory: Send + Sync {
    /// The user's payment identifier (e.g. a UPI handle), if they set one.
    fn payment_id(&self, user: UserId) -> Option<String>;

    /// The user's personal spend already recorded for the given month,
    /// before the expense currently being processed.
    fn monthly_spend(&self, user: UserId, year: i32, month: u32) -> Option<Decimal>;

    /// The user's configured monthly budget.
    fn monthly_budget(&self, user: UserId) -> Option<Decimal>;
}

/// A directory that knows nothing about anyone.
///
/// Disables budget alerts and leaves payment identifiers off settlement
/// requests; useful for consumers without a profile subsystem and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfiles;

impl ProfileDirectory for NoProfiles {
    fn payment_id(&self, _user: UserId) -> Option<String> {
        None
    }

    fn monthly_spend(&self, _user: UserId, _year: i32, _month: u32) -> Option<Decimal> {
        None
    }

    fn monthly_budget(&self, _user: UserId) -> Option<Decimal> {
        None
    }
}
