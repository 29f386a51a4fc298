//! OTP store backends
//!
//! Redis is the production backend shared by every process; the in-memory
//! store serves development and tests.

pub mod memory_store;
pub mod redis_client;
pub mod redis_store;


use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use vg_core::services::otp::ExpiringStore;
use vg_shared::{CacheConfig, CacheType};

pub use memory_store::MemoryStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisOtpStore;

use crate::InfrastructureError;

const MEMORY_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Store backend selected at startup
#[derive(Clone)]
pub enum OtpStore {
    Redis(RedisOtpStore),
    Memory(MemoryStore),
}

impl OtpStore {
    pub fn backend(&self) -> &'static str {
        match self {
            OtpStore::Redis(_) => "redis",
            OtpStore::Memory(_) => "memory",
        }
    }

    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        match self {
            OtpStore::Redis(store) => store.health_check().await,
            OtpStore::Memory(_) => Ok(true),
        }
    }
}

#[async_trait]
impl ExpiringStore for OtpStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            OtpStore::Redis(store) => store.get(key).await,
            OtpStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        match self {
            OtpStore::Redis(store) => store.set(key, value, ttl_seconds).await,
            OtpStore::Memory(store) => store.set(key, value, ttl_seconds).await,
        }
    }

    async fn delete(&self, keys: &[String]) -> Result<(), String> {
        match self {
            OtpStore::Redis(store) => store.delete(keys).await,
            OtpStore::Memory(store) => store.delete(keys).await,
        }
    }
}

/// Create the OTP store backend named by the configuration
pub async fn create_otp_store(config: &CacheConfig) -> Result<OtpStore, InfrastructureError> {
    match config.cache_type {
        CacheType::Redis => Ok(OtpStore::Redis(RedisOtpStore::connect(config.clone()).await?)),
        CacheType::Memory => {
            info!("Using in-memory OTP store; state is not shared between processes");
            let store = MemoryStore::new();
            store.spawn_purge_task(MEMORY_PURGE_INTERVAL);
            Ok(OtpStore::Memory(store))
        }
    }
}
