//! Traits for store and notification integration

use std::collections::HashMap;

use async_trait::async_trait;

/// Shared string key-value store where every entry carries its own TTL
///
/// Each call is atomic per key; nothing stronger is assumed.
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Read a value, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Write a value, replacing any previous value and TTL
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Remove every listed key; missing keys are ignored
    async fn delete(&self, keys: &[String]) -> Result<(), String>;
}

/// Outbound templated message delivery
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Render `template_id` with `variables` and deliver it to `recipient`
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<(), String>;
}
