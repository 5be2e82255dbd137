//! # saveurl-entity
//!
//! Domain entity models for SaveUrURL. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow` and serialize in camelCase, which is
//! the shape the JSON API exposes.

pub mod group;
pub mod link;
pub mod user;
pub mod vocabulary;
