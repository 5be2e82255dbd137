//! Link classification vocabularies (categories and sources).

pub mod model;

pub use model::{CustomEntry, VocabularyKind};
