//! Groups, their memberships, and the access rules around them.

pub mod access;
pub mod membership;
pub mod service;

pub use membership::{GroupMembers, MembershipService};
pub use service::{CreateGroupRequest, GroupService, UpdateGroupRequest};
