//! Shared application state and the health probe.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::JwtKeys;
use crate::services::AccountService;

/// Shared application state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub jwt_keys: JwtKeys,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }
    pub fn jwt_keys(&self) -> &JwtKeys {
        &self.jwt_keys
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "accounts" })),
    )
}
