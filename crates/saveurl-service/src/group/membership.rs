//! Group membership: read by owner or member, managed by the owner.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use saveurl_core::error::AppError;
use saveurl_core::types::{GroupId, MemberId};
use saveurl_database::store::{GroupStore, UserStore};
use saveurl_entity::group::{GroupMember, NewMember};
use saveurl_entity::user::UserProfile;

use super::access::{owned_group, readable_group};
use crate::context::RequestContext;
use crate::validation::require_email;

const NOT_OWNER: &str = "Group not found or you don't have permission";

/// A group's membership as shown to an owner or member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembers {
    pub members: Vec<GroupMember>,
    pub owner: UserProfile,
    pub group_name: String,
}

/// Manages group memberships.
#[derive(Clone)]
pub struct MembershipService {
    groups: Arc<dyn GroupStore>,
    users: Arc<dyn UserStore>,
    /// Membership rows allowed per group; the owner is not counted.
    max_members: i64,
}

impl std::fmt::Debug for MembershipService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipService")
            .field("max_members", &self.max_members)
            .finish_non_exhaustive()
    }
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(groups: Arc<dyn GroupStore>, users: Arc<dyn UserStore>, max_members: i64) -> Self {
        Self {
            groups,
            users,
            max_members,
        }
    }

    /// Members of a group, with its owner and name.
    pub async fn list_members(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
    ) -> Result<GroupMembers, AppError> {
        let group = readable_group(self.groups.as_ref(), ctx, group_id).await?;
        let members = self.groups.list_members(group_id).await?;
        let owner = self
            .users
            .find_by_id(group.owner_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Owner of group {group_id} is missing")))?;

        Ok(GroupMembers {
            members,
            owner: owner.profile(),
            group_name: group.name,
        })
    }

    /// Adds a registered user to a group owned by the requester.
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
        email: &str,
    ) -> Result<GroupMember, AppError> {
        let email = require_email(email)?;
        owned_group(self.groups.as_ref(), ctx, group_id, NOT_OWNER).await?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("No user found with this email address"))?;
        if user.id == ctx.user_id {
            return Err(AppError::validation("You are already the owner of this group"));
        }

        let member = self
            .groups
            .add_member(
                &NewMember {
                    group_id,
                    user_id: user.id,
                    email,
                },
                self.max_members,
            )
            .await?
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Group has reached maximum capacity of {} members",
                    self.max_members
                ))
            })?;

        info!(group_id = %group_id, member_id = %member.id, user_id = %user.id, "Member added");
        Ok(member)
    }

    /// Removes a membership row from a group owned by the requester.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<(), AppError> {
        owned_group(self.groups.as_ref(), ctx, group_id, NOT_OWNER).await?;

        if !self.groups.remove_member(group_id, member_id).await? {
            return Err(AppError::not_found("Member not found in this group"));
        }

        info!(group_id = %group_id, member_id = %member_id, "Member removed");
        Ok(())
    }
}
