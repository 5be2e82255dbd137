//! Route handlers organized by domain.

pub mod account;
pub mod auth;
pub mod group;
pub mod health;
pub mod link;
pub mod member;
pub mod vocabulary;
