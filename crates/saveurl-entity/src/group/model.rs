//! Group entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use saveurl_core::types::{GroupId, UserId};

use super::member::GroupMember;

/// A named collection of links owned by one user and shared with members.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    /// The creator; ownership is never transferred.
    pub owner_id: UserId,
    /// Trimmed name, unique per owner.
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Check whether the given user owns this group.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Data required to create a group.
#[derive(Debug, Clone)]
pub struct CreateGroup {
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
}

/// The fully resolved new state of a group's editable columns.
#[derive(Debug, Clone)]
pub struct UpdateGroup {
    pub name: String,
    pub description: Option<String>,
}

/// A group as listed for one requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOverview {
    #[serde(flatten)]
    pub group: Group,
    /// Membership rows ordered by join time.
    pub members: Vec<GroupMember>,
    /// Membership rows plus the owner.
    pub member_count: usize,
    /// Links scoped to the group.
    pub link_count: i64,
    /// Whether the requester owns the group.
    pub is_owner: bool,
}

impl GroupOverview {
    /// Assemble an overview; the owner is counted implicitly.
    pub fn new(group: Group, members: Vec<GroupMember>, link_count: i64, viewer: UserId) -> Self {
        let is_owner = group.is_owned_by(viewer);
        Self {
            member_count: members.len() + 1,
            group,
            members,
            link_count,
            is_owner,
        }
    }
}
