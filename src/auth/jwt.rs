//! JWT issue and validation (HMAC family only).

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Token payload. `sub` and `email` may be absent in tokens we did not mint
/// ourselves; consumers decide whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived once from the service secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            // Out-of-range lifetimes saturate; `issue_at` then refuses to sign.
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::max_value()),
        }
    }

    /// Token lifetime, also used for the cookie max-age.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: &str, email: &str) -> AppResult<String> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: &str, email: &str, now: DateTime<Utc>) -> AppResult<String> {
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::SigningFailure("token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: Some(user_id.to_string()),
            email: Some(email.to_string()),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::SigningFailure(e.to_string()))?;
        debug!(user_id = %user_id, "token issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verify algorithm, signature and expiry against the clock value `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<Claims> {
        let header = decode_header(token).map_err(|e| match e.kind() {
            // Unknown algorithm names such as "none" fail header deserialization.
            ErrorKind::Json(_) => AppError::InvalidSigningMethod,
            _ => AppError::InvalidToken(e.to_string()),
        })?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(AppError::InvalidSigningMethod);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        // Expiry is compared against `now` below so the clock can be injected.
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AppError::InvalidToken(e.to_string()))?;
        if data.claims.exp <= now.timestamp() {
            return Err(AppError::InvalidToken("token expired".to_string()));
        }
        Ok(data.claims)
    }
}
