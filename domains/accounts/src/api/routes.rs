//! Route definitions for Accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, profile};
use super::middleware::AccountsState;

/// Registration, login, and token refresh
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/token/refresh", post(auth::refresh))
}

/// Own profile
fn profile_routes() -> Router<AccountsState> {
    Router::new().route(
        "/profile",
        get(profile::get_profile)
            .put(profile::update_profile)
            .patch(profile::update_profile),
    )
}

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new().merge(auth_routes()).merge(profile_routes())
}
