//! In-memory account store for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use vg_core::domain::entities::user::User;
use vg_core::errors::{DomainError, OtpError};
use vg_core::repositories::UserRepository;

/// Account store keyed by email
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(OtpError::DuplicateIdentity.into());
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}
