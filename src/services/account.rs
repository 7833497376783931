//! Account orchestration: registration, login and profile lookup.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::{CredentialHasher, JwtKeys};
use crate::db::UserRepository;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, PublicUser};

/// Registration, login and profile over a user store.
///
/// Every store call and every hash operation runs under `timeout`.
#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn UserRepository>,
    keys: JwtKeys,
    timeout: Duration,
}

impl AccountService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: JwtKeys, timeout: Duration) -> Self {
        Self { repo, keys, timeout }
    }

    /// Create an account and return its id.
    ///
    /// The email pre-check is only a fast path: two concurrent registrations
    /// can both pass it, and the store's uniqueness guarantee decides.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> AppResult<Uuid> {
        if self.bounded(self.repo.find_by_email(email)).await?.is_some() {
            warn!(email = %email, "registration for existing email");
            return Err(AppError::DuplicateAccount);
        }

        let plaintext = password.to_string();
        let password_hash = self
            .blocking(move || CredentialHasher::hash(&plaintext))
            .await??;

        let id = self
            .bounded(self.repo.insert(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            }))
            .await?;

        info!(user_id = %id, email = %email, "user registered");
        Ok(id)
    }

    /// Check credentials and issue a token. Unknown email and wrong password
    /// fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let user = match self.bounded(self.repo.find_by_email(email)).await? {
            Some(user) => user,
            None => {
                debug!(email = %email, "login for unknown email");
                return Err(AppError::InvalidCredential);
            }
        };

        let hash = user.password_hash.clone();
        let candidate = password.to_string();
        let matched = self
            .blocking(move || CredentialHasher::verify(&hash, &candidate))
            .await?;
        if !matched {
            debug!(user_id = %user.id, "login with wrong password");
            return Err(AppError::InvalidCredential);
        }

        let token = self.keys.issue(&user.id.to_string(), &user.email)?;
        info!(user_id = %user.id, "user logged in");
        Ok(token)
    }

    /// Public profile of an authenticated subject.
    pub async fn profile(&self, subject_id: &str) -> AppResult<PublicUser> {
        let id = Uuid::parse_str(subject_id).map_err(|_| {
            warn!(subject = %subject_id, "token subject is not a user id");
            AppError::Unauthorized
        })?;
        let user = self
            .bounded(self.repo.find_by_id(id))
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(user.into())
    }

    async fn bounded<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| AppError::Timeout)?
    }

    /// Run CPU-heavy work off the async workers, under the same bound.
    async fn blocking<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::task::spawn_blocking(f);
        match tokio::time::timeout(self.timeout, handle).await {
            Err(_) => Err(AppError::Timeout),
            Ok(Err(join)) => Err(AppError::Internal(anyhow::Error::new(join))),
            Ok(Ok(value)) => Ok(value),
        }
    }
}
