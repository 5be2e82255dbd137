//! Group membership entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use saveurl_core::types::{GroupId, MemberId, UserId};

/// A user granted read access to a group, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: MemberId,
    pub group_id: GroupId,
    pub user_id: UserId,
    /// Normalized (trimmed, lower-cased) email.
    pub email: String,
    /// Display name of the member account.
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

/// Data required to add a membership row.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub email: String,
}
