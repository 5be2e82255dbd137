//! Group and membership entities.

pub mod member;
pub mod model;

pub use member::{GroupMember, NewMember};
pub use model::{CreateGroup, Group, GroupOverview, UpdateGroup};
