//! Category and source vocabularies.

pub mod service;

pub use service::{AddOutcome, VocabularyService};
