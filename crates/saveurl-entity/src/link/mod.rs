//! Saved link entities.

pub mod model;
pub mod visibility;

pub use model::{CreateLink, Link, PublicLink, UpdateLink};
pub use visibility::Visibility;
