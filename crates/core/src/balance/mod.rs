//! Net balance aggregation and debt simplification.

pub mod service;
pub mod simplify;
pub mod types;

pub use service::BalanceService;
pub use simplify::simplify;
pub use types::{GroupBalances, MemberBalance, Transfer};
