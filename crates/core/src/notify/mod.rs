//! Outbound notification boundary.
//!
//! Fire-and-forget events for the external messaging collaborator. Not part
//! of the core's correctness contract, but each qualifying settlement
//! transition must dispatch exactly once, so dispatch goes through a keyed
//! outbox.

pub mod dispatch;
pub mod outbox;
pub mod types;

pub use dispatch::Notifier;
pub use outbox::NotificationOutbox;
pub use types::{Notification, TransitionKind};
