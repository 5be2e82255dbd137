//! # saveurl-service
//!
//! Business logic service layer for SaveUrURL. Each service orchestrates
//! the stores, the auth primitives and the account mailer to implement an
//! application-level use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod group;
pub mod link;
pub mod validation;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{AccountService, SignupOutcome};
pub use context::RequestContext;
pub use group::{GroupMembers, GroupService, MembershipService};
pub use link::LinkService;
pub use vocabulary::{AddOutcome, VocabularyService};
