//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, OtpError};

use super::trait_::UserRepository;

/// Mock user repository keyed by email
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    should_fail: bool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Repository whose every call fails like a dropped connection
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "database unavailable".to_string(),
            });
        }
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "database unavailable".to_string(),
            });
        }

        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(OtpError::DuplicateIdentity.into());
        }

        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}
