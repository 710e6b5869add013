//! Group and membership domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{Currency, GroupId, UserId};

/// An expense group shared by a set of members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for the group.
    pub id: GroupId,
    /// Human-readable group name.
    pub name: String,
    /// Currency every expense in this group is denominated in.
    pub currency: Currency,
    /// Optional free-form description.
    pub description: Option<String>,
    /// The user who created the group.
    pub created_by: UserId,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// When the group was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A user's participation record in a group.
///
/// Unique per (group, user) pair. The creator's membership exists for the
/// lifetime of the group and carries the admin flag from creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// The group this membership belongs to.
    pub group_id: GroupId,
    /// The participating user.
    pub user_id: UserId,
    /// Whether the member can administer the group.
    pub is_admin: bool,
    /// Optional display name within this group.
    pub nickname: Option<String>,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// Input for adding one member to a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberInput {
    /// The user to add.
    pub user_id: UserId,
    /// Optional display name within the group.
    pub nickname: Option<String>,
    /// Whether the new member is an admin.
    #[serde(default)]
    pub is_admin: bool,
}

/// Input for creating a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupInput {
    /// Group name (must be non-empty).
    pub name: String,
    /// Group currency.
    pub currency: Currency,
    /// Optional description.
    pub description: Option<String>,
    /// The creating user; becomes an admin member automatically.
    pub created_by: UserId,
    /// Additional members to enroll at creation (the creator is implicit).
    #[serde(default)]
    pub members: Vec<MemberInput>,
}
