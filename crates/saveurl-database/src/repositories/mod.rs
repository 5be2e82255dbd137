//! PostgreSQL implementations of the store traits.

pub mod group;
pub mod link;
pub mod user;
pub mod vocabulary;

pub use group::GroupRepository;
pub use link::LinkRepository;
pub use user::UserRepository;
pub use vocabulary::VocabularyRepository;
