//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Shared OTP store (Redis or in-memory)
//! - `database` - Account storage (MySQL or in-memory)
//! - `email` - Outbound email delivery
//! - `environment` - Environment detection and logging configuration
//! - `registration` - Registration flow templates and password hashing
//! - `server` - HTTP server configuration

pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod registration;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheConfig, CacheType};
pub use database::{DatabaseConfig, UserStoreType};
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use registration::RegistrationConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Account storage configuration
    pub database: DatabaseConfig,

    /// OTP store configuration
    pub cache: CacheConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Registration flow configuration
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            registration: RegistrationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Each sub-configuration reads its own variables; anything unset falls
    /// back to the defaults for the detected environment.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(format) = std::env::var("LOG_FORMAT").ok().and_then(|f| f.parse().ok()) {
            logging.format = format;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            registration: RegistrationConfig::from_env(),
            logging,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
