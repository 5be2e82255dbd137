//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saveurl_auth::Claims;
use saveurl_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API layer from a verified session token and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Normalized email, used for membership lookups.
    pub email: String,
    /// Display name.
    pub name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            name: name.into(),
            request_time: Utc::now(),
        }
    }

    /// Context for the holder of a verified token.
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.user_id(), claims.email.clone(), claims.name.clone())
    }
}
