//! Default vocabularies and per-user custom entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use saveurl_core::types::{CustomEntryId, UserId};

const DEFAULT_CATEGORIES: &[&str] = &[
    "education",
    "music",
    "movies",
    "documents",
    "tech",
    "news",
    "social",
    "other",
];

const DEFAULT_SOURCES: &[&str] = &[
    "youtube",
    "facebook",
    "linkedin",
    "twitter",
    "instagram",
    "github",
    "medium",
    "reddit",
    "other",
];

/// The two open vocabularies a link is classified with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyKind {
    Category,
    Source,
}

impl VocabularyKind {
    /// The fixed allow-list every user starts with.
    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            Self::Category => DEFAULT_CATEGORIES,
            Self::Source => DEFAULT_SOURCES,
        }
    }

    /// Whether a normalized name is part of the fixed list.
    pub fn is_default(&self, name: &str) -> bool {
        self.defaults().contains(&name)
    }

    /// Capitalized noun for the start of a message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Source => "Source",
        }
    }

    /// Singular noun used in messages and JSON keys.
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Source => "source",
        }
    }

    /// Plural noun used in JSON keys.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Source => "sources",
        }
    }
}

/// A per-user addition to a vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomEntry {
    pub id: CustomEntryId,
    pub user_id: UserId,
    /// Lower-cased name.
    pub name: String,
    pub created_at: DateTime<Utc>,
}
