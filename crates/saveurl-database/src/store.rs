//! Store traits the services are written against.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-process implementation in [`crate::memory`]. Uniqueness rules
//! (account email, group name per owner, membership email per group,
//! custom entry per user) are enforced by the store itself so a
//! check-then-insert race cannot create duplicates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use saveurl_core::result::AppResult;
use saveurl_core::types::{GroupId, LinkId, MemberId, UserId};
use saveurl_entity::group::{CreateGroup, Group, GroupMember, NewMember, UpdateGroup};
use saveurl_entity::link::{CreateLink, Link, PublicLink, UpdateLink};
use saveurl_entity::user::{CreateUser, User};
use saveurl_entity::vocabulary::{CustomEntry, VocabularyKind};

/// Message for a second account with the same email.
pub const DUPLICATE_EMAIL: &str = "User with this email already exists";
/// Message for a second group with the same name under one owner.
pub const DUPLICATE_GROUP_NAME: &str = "You already have a group with this name";
/// Message for a second membership with the same email in one group.
pub const DUPLICATE_MEMBER: &str = "This user is already a member of the group";

/// User accounts and their one-time codes.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert an unverified user. Fails with `Conflict` if the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Delete a user and, by cascade, everything they own.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// Replace the email verification code.
    async fn set_verification_code(
        &self,
        id: UserId,
        code: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Mark the email verified and discard the verification code.
    async fn mark_verified(&self, id: UserId) -> AppResult<()>;

    /// Replace the password reset code.
    async fn set_reset_code(&self, id: UserId, code: &str, expiry: DateTime<Utc>)
    -> AppResult<()>;

    /// Store a new password hash and discard the reset code.
    async fn reset_password(&self, id: UserId, password_hash: &str) -> AppResult<()>;
}

/// Saved links.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// All links owned by a user, newest first.
    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<Link>>;

    /// All public links joined with their owner, newest first.
    async fn list_public(&self) -> AppResult<Vec<PublicLink>>;

    /// All links scoped to a group, newest first.
    async fn list_by_group(&self, group_id: GroupId) -> AppResult<Vec<Link>>;

    /// A link, only if it is owned by `owner`.
    async fn find_owned(&self, id: LinkId, owner: UserId) -> AppResult<Option<Link>>;

    /// Insert a link.
    async fn create(&self, data: &CreateLink) -> AppResult<Link>;

    /// Update a link if it is owned by `owner`. `None` when no owned row matches.
    async fn update_owned(
        &self,
        id: LinkId,
        owner: UserId,
        data: &UpdateLink,
    ) -> AppResult<Option<Link>>;

    /// Delete a link if it is owned by `owner`. `false` when no owned row matches.
    async fn delete_owned(&self, id: LinkId, owner: UserId) -> AppResult<bool>;

    /// Number of links scoped to a group.
    async fn count_by_group(&self, group_id: GroupId) -> AppResult<i64>;
}

/// Groups and their membership rows.
#[async_trait]
pub trait GroupStore: Send + Sync + 'static {
    /// Find a group by primary key.
    async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>>;

    /// Groups owned by `user_id` or with `email` in their membership,
    /// each listed once, newest first.
    async fn list_for_user(&self, user_id: UserId, email: &str) -> AppResult<Vec<Group>>;

    /// Insert a group. Fails with `Duplicate` if the owner already has a
    /// group with that name.
    async fn create(&self, data: &CreateGroup) -> AppResult<Group>;

    /// Overwrite a group's editable columns. Fails with `Duplicate` if
    /// another group of the same owner has that name.
    async fn update(&self, id: GroupId, data: &UpdateGroup) -> AppResult<Option<Group>>;

    /// Delete a group together with its memberships and scoped links.
    async fn delete(&self, id: GroupId) -> AppResult<bool>;

    /// Membership rows of a group ordered by join time.
    async fn list_members(&self, group_id: GroupId) -> AppResult<Vec<GroupMember>>;

    /// A membership row, only if it belongs to `group_id`.
    async fn find_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> AppResult<Option<GroupMember>>;

    /// Whether `email` appears in the group's membership.
    async fn is_member(&self, group_id: GroupId, email: &str) -> AppResult<bool>;

    /// Number of membership rows in a group.
    async fn count_members(&self, group_id: GroupId) -> AppResult<i64>;

    /// Insert a membership row while the group holds fewer than `capacity`
    /// rows. `None` when the group is full; `Duplicate` if the email is
    /// already a member.
    async fn add_member(&self, data: &NewMember, capacity: i64)
    -> AppResult<Option<GroupMember>>;

    /// Delete a membership row of `group_id`.
    async fn remove_member(&self, group_id: GroupId, member_id: MemberId) -> AppResult<bool>;
}

/// Per-user custom categories and sources.
#[async_trait]
pub trait VocabularyStore: Send + Sync + 'static {
    /// Custom entries of a user, oldest first.
    async fn list_custom(&self, user_id: UserId, kind: VocabularyKind)
    -> AppResult<Vec<CustomEntry>>;

    /// Insert a custom entry. `None` when the user already has it.
    async fn insert_custom(
        &self,
        user_id: UserId,
        kind: VocabularyKind,
        name: &str,
    ) -> AppResult<Option<CustomEntry>>;
}
