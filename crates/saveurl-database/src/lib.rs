//! # saveurl-database
//!
//! PostgreSQL connection management, the store traits the services are
//! written against, their PostgreSQL repository implementations, and an
//! in-process store with the same semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{GroupStore, LinkStore, UserStore, VocabularyStore};
