//! In-process list of revoked token IDs.

use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

/// Token IDs revoked by logout.
///
/// Entries live as long as the longest possible token, after which the
/// token is rejected by its own expiry anyway. The cache has no size bound:
/// evicting a live entry early would make its token valid again, so growth
/// is limited only by how many sessions end within one token lifetime.
#[derive(Clone)]
pub struct RevocationList {
    revoked: Cache<Uuid, ()>,
}

impl std::fmt::Debug for RevocationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationList")
            .field("entries", &self.revoked.entry_count())
            .finish()
    }
}

impl RevocationList {
    /// Creates a list that remembers revocations for `token_ttl`.
    pub fn new(token_ttl: Duration) -> Self {
        Self {
            revoked: Cache::builder().time_to_live(token_ttl).build(),
        }
    }

    /// Revoke a token ID.
    pub async fn revoke(&self, jti: Uuid) {
        self.revoked.insert(jti, ()).await;
    }

    /// Whether a token ID was revoked.
    pub fn is_revoked(&self, jti: &Uuid) -> bool {
        self.revoked.contains_key(jti)
    }
}
