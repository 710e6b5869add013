//! Error types for group and membership operations.

use splitledger_shared::types::UserId;
use thiserror::Error;

/// Errors that can occur while managing groups and memberships.
#[derive(Debug, Error)]
pub enum GroupError {
    /// Group name was empty or whitespace.
    #[error("Group name must not be empty")]
    EmptyName,

    /// The (group, user) pair already exists.
    #[error("User {user_id} is already a member of this group")]
    DuplicateMember {
        /// The user that was added twice.
        user_id: UserId,
    },

    /// Attempted to remove the group creator's membership.
    #[error("Cannot remove the group creator")]
    CannotRemoveCreator,

    /// The user is not a member of the group.
    #[error("User {user_id} is not a member of this group")]
    NotAMember {
        /// The non-member user.
        user_id: UserId,
    },

    /// The action requires the admin flag.
    #[error("User {user_id} is not an admin of this group")]
    AdminRequired {
        /// The user lacking the admin flag.
        user_id: UserId,
    },
}

impl GroupError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::EmptyName | Self::CannotRemoveCreator => 400,
            Self::DuplicateMember { .. } => 409,
            Self::NotAMember { .. } | Self::AdminRequired { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_GROUP_NAME",
            Self::DuplicateMember { .. } => "DUPLICATE_MEMBER",
            Self::CannotRemoveCreator => "CANNOT_REMOVE_CREATOR",
            Self::NotAMember { .. } => "NOT_A_MEMBER",
            Self::AdminRequired { .. } => "ADMIN_REQUIRED",
        }
    }
}
