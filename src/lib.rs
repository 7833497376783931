//! User account service: register, login and profile behind JWT auth.
//!
//! Tokens are accepted from an `Authorization: Bearer` header or a `token`
//! cookie; the `/api` group is gated by [`middleware::require_auth`].

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::AccountService;

use axum::routing::{get, post};
use handlers::http;
use tower_http::trace::TraceLayer;

/// Build the API router (user, protected api, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let user_routes = axum::Router::new()
        .route("/create", post(auth::create_user))
        .route("/login", post(auth::login_user));

    let api_routes = axum::Router::new()
        .route("/me", get(auth::me))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    axum::Router::new()
        .route("/health", get(http::health))
        .nest("/user", user_routes)
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
