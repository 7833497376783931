//! In-process user store, used by tests and by `STORE=memory` runs.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::UserRepository;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<Uuid> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateAccount);
        }
        let id = Uuid::new_v4();
        users.insert(
            id,
            User {
                id,
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Al".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = MemoryUserRepository::new();
        let id = repo.insert(new_user("a@b.com")).await.unwrap();

        let by_email = repo.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, id);
        let by_id = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@b.com");
        assert!(repo.find_by_email("A@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let repo = MemoryUserRepository::new();
        repo.insert(new_user("a@b.com")).await.unwrap();
        let err = repo.insert(new_user("a@b.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateAccount));
        assert_eq!(repo.len().await, 1);
    }
}
