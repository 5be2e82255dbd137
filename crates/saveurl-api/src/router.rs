//! Route definitions for the SaveUrURL HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(account_routes())
        .merge(auth_routes())
        .merge(link_routes())
        .merge(group_routes())
        .merge(vocabulary_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Signup, verification and password reset
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::account::signup))
        .route("/verify-email", post(handlers::account::verify_email))
        .route("/forgot-password", post(handlers::account::forgot_password))
        .route("/reset-password", post(handlers::account::reset_password))
}

/// Auth endpoints: login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Link CRUD and feeds
fn link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/links",
            get(handlers::link::list_links)
                .post(handlers::link::create_link)
                .put(handlers::link::update_link)
                .delete(handlers::link::delete_link),
        )
        .route("/public-links", get(handlers::link::list_public_links))
}

/// Group CRUD, membership and group feeds
fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(handlers::group::list_groups)
                .post(handlers::group::create_group)
                .put(handlers::group::update_group)
                .delete(handlers::group::delete_group),
        )
        .route(
            "/groups/members",
            get(handlers::member::list_members)
                .post(handlers::member::add_member)
                .delete(handlers::member::remove_member),
        )
        .route("/groups/links", get(handlers::link::list_group_links))
}

/// Categories and sources
fn vocabulary_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::vocabulary::list_categories).post(handlers::vocabulary::add_category),
        )
        .route(
            "/sources",
            get(handlers::vocabulary::list_sources).post(handlers::vocabulary::add_source),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
