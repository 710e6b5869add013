//! Group service for membership rules.
//!
//! Stateless validation and construction logic. The ledger owns persistence;
//! this service decides what is allowed.

use chrono::Utc;
use splitledger_shared::types::{GroupId, UserId};

use super::error::GroupError;
use super::types::{CreateGroupInput, Group, Membership};

/// Stateless service for group and membership rules.
pub struct GroupService;

impl GroupService {
    /// Build a group and its initial membership set from creation input.
    ///
    /// The creator is always enrolled first, with the admin flag, regardless
    /// of whether the input lists them again. Listing any other user twice is
    /// rejected rather than silently collapsed.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::EmptyName` if the name is blank and
    /// `GroupError::DuplicateMember` if a non-creator user appears twice.
    pub fn create(input: CreateGroupInput) -> Result<(Group, Vec<Membership>), GroupError> {
        if input.name.trim().is_empty() {
            return Err(GroupError::EmptyName);
        }

        let now = Utc::now();
        let group = Group {
            id: GroupId::new(),
            name: input.name,
            currency: input.currency,
            description: input.description,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        };

        let mut memberships = vec![Membership {
            group_id: group.id,
            user_id: input.created_by,
            is_admin: true,
            nickname: None,
            joined_at: now,
        }];

        for member in input.members {
            if member.user_id == input.created_by {
                continue;
            }
            if memberships.iter().any(|m| m.user_id == member.user_id) {
                return Err(GroupError::DuplicateMember {
                    user_id: member.user_id,
                });
            }
            memberships.push(Membership {
                group_id: group.id,
                user_id: member.user_id,
                is_admin: member.is_admin,
                nickname: member.nickname,
                joined_at: now,
            });
        }

        Ok((group, memberships))
    }

    /// Build a membership for a user joining an existing group.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::DuplicateMember` if the pair already exists.
    pub fn add_member(
        memberships: &[Membership],
        group_id: GroupId,
        user_id: UserId,
        nickname: Option<String>,
        is_admin: bool,
    ) -> Result<Membership, GroupError> {
        if memberships.iter().any(|m| m.user_id == user_id) {
            return Err(GroupError::DuplicateMember { user_id });
        }
        Ok(Membership {
            group_id,
            user_id,
            is_admin,
            nickname,
            joined_at: Utc::now(),
        })
    }

    /// Check that a member may be removed from the group.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::CannotRemoveCreator` for the creator and
    /// `GroupError::NotAMember` if the pair does not exist.
    pub fn validate_removal(
        group: &Group,
        memberships: &[Membership],
        user_id: UserId,
    ) -> Result<(), GroupError> {
        if user_id == group.created_by {
            return Err(GroupError::CannotRemoveCreator);
        }
        if !memberships.iter().any(|m| m.user_id == user_id) {
            return Err(GroupError::NotAMember { user_id });
        }
        Ok(())
    }

    /// Check that a user is a member of the group.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::NotAMember` otherwise.
    pub fn ensure_member(memberships: &[Membership], user_id: UserId) -> Result<(), GroupError> {
        if memberships.iter().any(|m| m.user_id == user_id) {
            Ok(())
        } else {
            Err(GroupError::NotAMember { user_id })
        }
    }

    /// Check that a user is an admin member of the group.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::NotAMember` for non-members and
    /// `GroupError::AdminRequired` for members without the flag.
    pub fn ensure_admin(memberships: &[Membership], user_id: UserId) -> Result<(), GroupError> {
        match memberships.iter().find(|m| m.user_id == user_id) {
            None => Err(GroupError::NotAMember { user_id }),
            Some(m) if !m.is_admin => Err(GroupError::AdminRequired { user_id }),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::types::MemberInput;
    use splitledger_shared::types::Currency;

    fn make_input(creator: UserId, members: Vec<MemberInput>) -> CreateGroupInput {
        CreateGroupInput {
            name: "Trip to Goa".to_string(),
            currency: Currency::Inr,
            description: None,
            created_by: creator,
            members,
        }
    }

    #[test]
    fn test_create_enrolls_creator_as_admin() {
        let creator = UserId::new();
        let (group, memberships) = GroupService::create(make_input(creator, vec![])).unwrap();

        assert_eq!(group.created_by, creator);
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].user_id, creator);
        assert!(memberships[0].is_admin);
    }

    #[test]
    fn test_create_with_members() {
        let creator = UserId::new();
        let other = UserId::new();
        let (_, memberships) = GroupService::create(make_input(
            creator,
            vec![MemberInput {
                user_id: other,
                nickname: Some("Sam".to_string()),
                is_admin: false,
            }],
        ))
        .unwrap();

        assert_eq!(memberships.len(), 2);
        assert_eq!(memberships[1].user_id, other);
        assert!(!memberships[1].is_admin);
        assert_eq!(memberships[1].nickname.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_create_skips_creator_in_member_list() {
        let creator = UserId::new();
        let (_, memberships) = GroupService::create(make_input(
            creator,
            vec![MemberInput {
                user_id: creator,
                nickname: None,
                is_admin: false,
            }],
        ))
        .unwrap();

        // Still one membership, and the admin flag survived.
        assert_eq!(memberships.len(), 1);
        assert!(memberships[0].is_admin);
    }

    #[test]
    fn test_create_rejects_duplicate_member() {
        let creator = UserId::new();
        let dup = UserId::new();
        let member = MemberInput {
            user_id: dup,
            nickname: None,
            is_admin: false,
        };
        let result = GroupService::create(make_input(creator, vec![member.clone(), member]));

        assert!(matches!(
            result,
            Err(GroupError::DuplicateMember { user_id }) if user_id == dup
        ));
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut input = make_input(UserId::new(), vec![]);
        input.name = "   ".to_string();
        assert!(matches!(
            GroupService::create(input),
            Err(GroupError::EmptyName)
        ));
    }

    #[test]
    fn test_add_member_rejects_existing() {
        let creator = UserId::new();
        let (group, memberships) = GroupService::create(make_input(creator, vec![])).unwrap();

        let result = GroupService::add_member(&memberships, group.id, creator, None, false);
        assert!(matches!(result, Err(GroupError::DuplicateMember { .. })));
    }

    #[test]
    fn test_validate_removal_protects_creator() {
        let creator = UserId::new();
        let (group, memberships) = GroupService::create(make_input(creator, vec![])).unwrap();

        assert!(matches!(
            GroupService::validate_removal(&group, &memberships, creator),
            Err(GroupError::CannotRemoveCreator)
        ));
    }

    #[test]
    fn test_validate_removal_unknown_member() {
        let creator = UserId::new();
        let (group, memberships) = GroupService::create(make_input(creator, vec![])).unwrap();

        assert!(matches!(
            GroupService::validate_removal(&group, &memberships, UserId::new()),
            Err(GroupError::NotAMember { .. })
        ));
    }

    #[test]
    fn test_ensure_admin() {
        let creator = UserId::new();
        let other = UserId::new();
        let (group, mut memberships) = GroupService::create(make_input(creator, vec![])).unwrap();
        memberships
            .push(GroupService::add_member(&memberships, group.id, other, None, false).unwrap());

        assert!(GroupService::ensure_admin(&memberships, creator).is_ok());
        assert!(matches!(
            GroupService::ensure_admin(&memberships, other),
            Err(GroupError::AdminRequired { .. })
        ));
        assert!(matches!(
            GroupService::ensure_admin(&memberships, UserId::new()),
            Err(GroupError::NotAMember { .. })
        ));
    }
}
