//! Redis-backed implementation of the OTP store

use async_trait::async_trait;

use vg_core::services::otp::ExpiringStore;
use vg_shared::CacheConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// OTP store shared by every process through one Redis instance
#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    /// Connect a new client and wrap it
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(&config).await?;
        Ok(Self::new(client, config))
    }

    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        self.client.health_check().await
    }
}

#[async_trait]
impl ExpiringStore for RedisOtpStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client
            .get(&self.config.make_key(key))
            .await
            .map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client
            .set_with_expiry(&self.config.make_key(key), value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), String> {
        let keys: Vec<String> = keys.iter().map(|k| self.config.make_key(k)).collect();
        self.client
            .delete_many(&keys)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
