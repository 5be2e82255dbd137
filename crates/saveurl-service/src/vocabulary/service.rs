//! Default vocabularies merged with each user's custom entries.

use std::sync::Arc;

use tracing::info;

use saveurl_core::error::AppError;
use saveurl_database::store::VocabularyStore;
use saveurl_entity::vocabulary::{CustomEntry, VocabularyKind};

use crate::context::RequestContext;

/// Result of adding a name to a vocabulary.
#[derive(Debug, Clone)]
pub enum AddOutcome {
    /// A new custom entry was stored.
    Added(CustomEntry),
    /// The name is part of the default list.
    AlreadyDefault,
    /// The user already added the name.
    AlreadyExists,
}

/// Manages the category and source vocabularies.
#[derive(Clone)]
pub struct VocabularyService {
    store: Arc<dyn VocabularyStore>,
}

impl std::fmt::Debug for VocabularyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyService").finish_non_exhaustive()
    }
}

impl VocabularyService {
    /// Creates a new vocabulary service.
    pub fn new(store: Arc<dyn VocabularyStore>) -> Self {
        Self { store }
    }

    /// Defaults followed by the requester's custom entries.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        kind: VocabularyKind,
    ) -> Result<Vec<String>, AppError> {
        let mut names: Vec<String> = kind.defaults().iter().map(|n| n.to_string()).collect();
        for entry in self.store.list_custom(ctx.user_id, kind).await? {
            if !names.contains(&entry.name) {
                names.push(entry.name);
            }
        }
        Ok(names)
    }

    /// Adds a custom entry unless the name is already known.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        kind: VocabularyKind,
        name: &str,
    ) -> Result<AddOutcome, AppError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(AppError::validation(format!("{} name is required", kind.label())));
        }
        if kind.is_default(&name) {
            return Ok(AddOutcome::AlreadyDefault);
        }

        match self.store.insert_custom(ctx.user_id, kind, &name).await? {
            Some(entry) => {
                info!(user_id = %ctx.user_id, kind = kind.singular(), name = %entry.name, "Custom entry added");
                Ok(AddOutcome::Added(entry))
            }
            None => Ok(AddOutcome::AlreadyExists),
        }
    }
}
