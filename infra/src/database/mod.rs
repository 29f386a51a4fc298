//! Account storage - MySQL via SQLx, or in memory for development

pub mod connection;
pub mod memory;
pub mod mysql;


use async_trait::async_trait;

use vg_core::domain::entities::user::User;
use vg_core::errors::DomainError;
use vg_core::repositories::UserRepository;
use vg_shared::{DatabaseConfig, UserStoreType};

pub use connection::DatabasePool;
pub use memory::MemoryUserRepository;
pub use mysql::MySqlUserRepository;

use crate::InfrastructureError;

/// Account store selected at startup
pub enum UserStore {
    MySql(MySqlUserRepository),
    Memory(MemoryUserRepository),
}

impl UserStore {
    /// Release backend connections on shutdown
    pub async fn close(&self) {
        match self {
            UserStore::MySql(repo) => repo.close().await,
            UserStore::Memory(_) => {}
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        match self {
            UserStore::MySql(repo) => repo.find_by_email(email).await,
            UserStore::Memory(repo) => repo.find_by_email(email).await,
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        match self {
            UserStore::MySql(repo) => repo.create(user).await,
            UserStore::Memory(repo) => repo.create(user).await,
        }
    }
}

/// Create the account store named by the configuration
pub async fn create_user_store(config: &DatabaseConfig) -> Result<UserStore, InfrastructureError> {
    match config.store_type {
        UserStoreType::MySql => {
            let pool = DatabasePool::new(config).await?;
            Ok(UserStore::MySql(MySqlUserRepository::new(pool.get_pool().clone())))
        }
        UserStoreType::Memory => {
            tracing::info!("Using in-memory account store; accounts are lost on restart");
            Ok(UserStore::Memory(MemoryUserRepository::new()))
        }
    }
}
