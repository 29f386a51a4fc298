//! Shared utilities and common types for VerifyGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response envelopes
//! - Utility functions (email validation, log masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CacheType, DatabaseConfig, EmailConfig, EmailProvider, Environment, LogFormat,
    LoggingConfig, RegistrationConfig, ServerConfig, UserStoreType,
};
pub use types::{ErrorBody, HealthResponse, MessageResponse};
pub use utils::{mask, validation};
