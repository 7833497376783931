//! Auth middleware: bearer header or `token` cookie, verified before any
//! protected handler runs.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;

pub const TOKEN_COOKIE: &str = "token";
const BEARER_PREFIX: &str = "Bearer ";

/// Verified identity bound to one request. Fields absent from the token stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<String>,
    pub email: Option<String>,
}

/// Prefer `Authorization: Bearer`, fall back to the cookie.
fn extract_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }
    jar.get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Middleware: reject the request unless it carries a valid token; on success
/// attach an [`Identity`] to the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers(), &jar).ok_or(AppError::MissingToken)?;
    let claims = state.jwt_keys().verify(&token)?;
    debug!(user_id = ?claims.sub, "token accepted");

    request.extensions_mut().insert(Identity {
        user_id: claims.sub,
        email: claims.email,
    });
    Ok(next.run(request).await)
}

/// Extractor: authenticated user id from the identity bound by [`require_auth`].
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AppError::Unauthorized)?;
        let user_id = identity.user_id.ok_or(AppError::Unauthorized)?;
        Ok(AuthUser {
            user_id,
            email: identity.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let h = headers(&[(AUTHORIZATION, "Bearer from-header"), (COOKIE, "token=from-cookie")]);
        let jar = CookieJar::from_headers(&h);
        assert_eq!(extract_token(&h, &jar).as_deref(), Some("from-header"));
    }

    #[test]
    fn falls_back_to_cookie() {
        let h = headers(&[(AUTHORIZATION, "Basic abc"), (COOKIE, "other=1; token=from-cookie")]);
        let jar = CookieJar::from_headers(&h);
        assert_eq!(extract_token(&h, &jar).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn nothing_to_extract() {
        let h = headers(&[(AUTHORIZATION, "Bearer ")]);
        let jar = CookieJar::from_headers(&h);
        assert_eq!(extract_token(&h, &jar), None);
        let empty = HeaderMap::new();
        assert_eq!(extract_token(&empty, &CookieJar::from_headers(&empty)), None);
    }

    #[tokio::test]
    async fn auth_user_requires_subject() {
        let req = axum::http::Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        parts.extensions.insert(Identity {
            user_id: None,
            email: Some("a@b.com".into()),
        });
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
