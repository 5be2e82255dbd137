//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use saveurl_auth::SessionManager;
use saveurl_core::config::AppConfig;
use saveurl_database::DatabasePool;
use saveurl_service::{
    AccountService, GroupService, LinkService, MembershipService, VocabularyService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool; `None` when running on the in-memory store
    pub db_pool: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Login, token resolution and logout
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Signup, verification and password reset
    pub account_service: Arc<AccountService>,
    /// Saved links and the public feed
    pub link_service: Arc<LinkService>,
    /// Group CRUD
    pub group_service: Arc<GroupService>,
    /// Group membership
    pub membership_service: Arc<MembershipService>,
    /// Categories and sources
    pub vocabulary_service: Arc<VocabularyService>,
}
