//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use vg_core::domain::entities::user::{User, UserRole};
use vg_core::errors::{DomainError, OtpError};
use vg_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
///
/// Relies on the unique index on `users.email` to reject a second account
/// racing through verification at the same time.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Close every pooled connection; later queries fail
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let role: String = row.try_get("role").map_err(column_error("role"))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| database_error(format!("Invalid UUID: {}", e)))?,
            name: row.try_get("name").map_err(column_error("name"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            role: role.parse::<UserRole>().map_err(database_error)?,
            phone_number: row
                .try_get("phone_number")
                .map_err(column_error("phone_number"))?,
            country: row.try_get("country").map_err(column_error("country"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, password_hash, role,
                   phone_number, country, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, role,
                phone_number, country, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.phone_number)
            .bind(&user.country)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::from(OtpError::DuplicateIdentity)
                }
                _ => database_error(format!("Failed to create user: {}", e)),
            })?;

        Ok(user)
    }
}

fn database_error(message: impl Into<String>) -> DomainError {
    DomainError::Internal {
        message: message.into(),
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| database_error(format!("Failed to get {}: {}", column, e))
}
