//! # Infrastructure Layer
//!
//! Concrete adapters behind the seams defined in `vg_core`:
//! - **Cache**: Redis and in-memory implementations of the OTP store
//! - **Email**: SMTP delivery with Tera templates, plus a mock sender
//! - **Database**: MySQL account storage using SQLx, plus an in-memory store
//!
//! Each concern has a `create_*` factory that picks the backend from the
//! shared configuration.

pub mod cache;
pub mod database;
pub mod email;

pub use cache::{create_otp_store, MemoryStore, OtpStore, RedisClient, RedisOtpStore};
pub use database::{create_user_store, MemoryUserRepository, MySqlUserRepository, UserStore};
pub use email::{create_email_sender, EmailSender, MockEmailSender, SmtpEmailSender};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email composition or delivery error
    #[error("Email error: {0}")]
    Email(String),

    /// Template loading or rendering error
    #[error("Template error: {0}")]
    Template(String),
}
