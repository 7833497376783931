//! Account HTTP handlers: create, login, me.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::{AuthUser, TOKEN_COOKIE};
use crate::models::PublicUser;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

fn malformed(rejection: JsonRejection) -> AppError {
    AppError::MalformedInput(rejection.body_text())
}

/// POST /user/create
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, AppError> {
    let Json(body) = payload.map_err(malformed)?;
    body.validate().map_err(|e| AppError::MalformedInput(e.to_string()))?;

    let id = state
        .accounts()
        .register(&body.email, &body.password, &body.name)
        .await?;
    Ok(Json(CreateUserResponse { id: id.to_string() }))
}

/// POST /user/login — token in the body and in an HTTP-only cookie.
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let Json(body) = payload.map_err(malformed)?;
    let token = state.accounts().login(&body.email, &body.password).await?;

    let max_age = time::Duration::seconds(state.jwt_keys().ttl().num_seconds());
    let cookie = Cookie::build((TOKEN_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .max_age(max_age);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "login success",
            token,
        }),
    ))
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let profile = state.accounts().profile(&user.user_id).await?;
    Ok(Json(profile))
}
