//! Application builder: wires stores, auth, mail and services into state,
//! and state plus middleware into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use saveurl_auth::{
    JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, RevocationList, SessionManager,
};
use saveurl_core::config::AppConfig;
use saveurl_database::repositories::{
    GroupRepository, LinkRepository, UserRepository, VocabularyRepository,
};
use saveurl_database::{
    DatabasePool, GroupStore, LinkStore, MemoryStore, UserStore, VocabularyStore,
};
use saveurl_mail::{AccountMailer, Mailer};
use saveurl_service::{
    AccountService, GroupService, LinkService, MembershipService, VocabularyService,
};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// The four stores the services run against.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub links: Arc<dyn LinkStore>,
    pub groups: Arc<dyn GroupStore>,
    pub vocabulary: Arc<dyn VocabularyStore>,
    /// Present when the stores are backed by PostgreSQL.
    pub pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("postgres", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}

impl Stores {
    /// Every store backed by one in-process [`MemoryStore`].
    pub fn memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Every store backed by the given in-process store.
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            links: store.clone(),
            groups: store.clone(),
            vocabulary: store,
            pool: None,
        }
    }

    /// Every store backed by PostgreSQL repositories.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            links: Arc::new(LinkRepository::new(pg.clone())),
            groups: Arc::new(GroupRepository::new(pg.clone())),
            vocabulary: Arc::new(VocabularyRepository::new(pg)),
            pool: Some(pool),
        }
    }
}

/// Builds the application state from configuration, stores and a mail
/// transport.
pub fn build_state(config: AppConfig, stores: Stores, transport: Arc<dyn Mailer>) -> AppState {
    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let revocations = RevocationList::new(Duration::from_secs(
        config.auth.session_ttl_hours.saturating_mul(3600),
    ));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, revocations));
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&stores.users),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    ));

    // ── Mail ─────────────────────────────────────────────────────
    let account_mailer = Arc::new(AccountMailer::new(
        transport,
        &config.mail,
        config.auth.verification_code_ttl_minutes,
    ));

    // ── Services ─────────────────────────────────────────────────
    let account_service = Arc::new(AccountService::new(
        Arc::clone(&stores.users),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        account_mailer,
        config.auth.verification_code_ttl_minutes,
    ));
    let link_service = Arc::new(LinkService::new(
        Arc::clone(&stores.links),
        Arc::clone(&stores.groups),
    ));
    let group_service = Arc::new(GroupService::new(
        Arc::clone(&stores.groups),
        Arc::clone(&stores.links),
        &config.limits,
    ));
    let membership_service = Arc::new(MembershipService::new(
        Arc::clone(&stores.groups),
        Arc::clone(&stores.users),
        config.limits.max_group_members,
    ));
    let vocabulary_service = Arc::new(VocabularyService::new(Arc::clone(&stores.vocabulary)));

    info!(
        store = if stores.pool.is_some() { "postgres" } else { "memory" },
        "Application state initialized"
    );

    AppState {
        config: Arc::new(config),
        db_pool: stores.pool,
        session_manager,
        account_service,
        link_service,
        group_service,
        membership_service,
        vocabulary_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}
