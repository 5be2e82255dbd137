//! Link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use saveurl_core::types::{GroupId, LinkId, UserId};

use super::visibility::Visibility;

/// A URL saved by a user, with its classification metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    /// Owner of the link.
    pub user_id: UserId,
    /// Absolute URL.
    pub url: String,
    pub title: Option<String>,
    /// Platform the link comes from (`youtube`, `github`, or a custom value).
    pub source: String,
    /// Category (`tech`, `music`, or a custom value).
    pub category: String,
    /// Comma-separated tags.
    pub tags: Option<String>,
    pub description: Option<String>,
    pub visibility: Visibility,
    /// Group the link is shared with, if any.
    pub group_id: Option<GroupId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A public link joined with its owner's identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicLink {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub link: Link,
    pub user_name: String,
    pub user_email: String,
}

/// Data required to create a link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub user_id: UserId,
    pub url: String,
    pub title: Option<String>,
    pub source: String,
    pub category: String,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub group_id: Option<GroupId>,
}

/// A partial update of a link.
///
/// `None` for `url`, `source`, `category`, `visibility` and `group_id`
/// leaves the column untouched. `title`, `tags` and `description` are
/// always written, so `None` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateLink {
    pub url: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    /// `Some(None)` detaches the link from its group.
    pub group_id: Option<Option<GroupId>>,
}

impl UpdateLink {
    /// Apply this update to an in-memory link.
    pub fn apply(&self, link: &mut Link, now: DateTime<Utc>) {
        if let Some(url) = &self.url {
            link.url = url.clone();
        }
        if let Some(source) = &self.source {
            link.source = source.clone();
        }
        if let Some(category) = &self.category {
            link.category = category.clone();
        }
        if let Some(visibility) = self.visibility {
            link.visibility = visibility;
        }
        if let Some(group_id) = self.group_id {
            link.group_id = group_id;
        }
        link.title = self.title.clone();
        link.tags = self.tags.clone();
        link.description = self.description.clone();
        link.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Link {
        let now = Utc::now();
        Link {
            id: LinkId(1),
            user_id: UserId(1),
            url: "https://example.com".into(),
            title: Some("Example".into()),
            source: "github".into(),
            category: "tech".into(),
            tags: Some("rust, web,,".into()),
            description: Some("notes".into()),
            visibility: Visibility::Private,
            group_id: Some(GroupId(4)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_update_keeps_omitted_columns_and_clears_text() {
        let mut link = sample();
        let update = UpdateLink {
            category: Some("news".into()),
            ..Default::default()
        };
        update.apply(&mut link, Utc::now());
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.source, "github");
        assert_eq!(link.category, "news");
        assert_eq!(link.group_id, Some(GroupId(4)));
        assert!(link.title.is_none());
        assert!(link.tags.is_none());
        assert!(link.description.is_none());
    }

    #[test]
    fn test_update_can_detach_group() {
        let mut link = sample();
        let update = UpdateLink {
            group_id: Some(None),
            ..Default::default()
        };
        update.apply(&mut link, Utc::now());
        assert!(link.group_id.is_none());
    }

    #[test]
    fn test_public_link_flattens_into_camel_case() {
        let public = PublicLink {
            link: sample(),
            user_name: "Ann".into(),
            user_email: "a@x.com".into(),
        };
        let json = serde_json::to_value(&public).expect("serialize");
        assert_eq!(json["userName"], "Ann");
        assert_eq!(json["userId"], 1);
        assert_eq!(json["url"], "https://example.com");
    }
}
