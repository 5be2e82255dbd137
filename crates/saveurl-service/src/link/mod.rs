//! Saved link use cases.

pub mod service;

pub use service::{CreateLinkRequest, LinkService, UpdateLinkRequest};
