//! User entity representing a registered account in the VerifyGate system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration role; sellers carry extra contact fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Generic user identified by email only
    User,
    /// Seller account with phone number and country
    Seller,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Seller => "seller",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "seller" => Ok(UserRole::Seller),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// User entity representing a verified, persisted account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (the verified identity)
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: UserRole,

    /// Seller phone number
    pub phone_number: Option<String>,

    /// Seller country
    pub country: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new generic user
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role: UserRole::User,
            phone_number: None,
            country: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a new seller with contact details
    pub fn new_seller(
        name: String,
        email: String,
        password_hash: String,
        phone_number: String,
        country: String,
    ) -> Self {
        Self {
            role: UserRole::Seller,
            phone_number: Some(phone_number),
            country: Some(country),
            ..Self::new(name, email, password_hash)
        }
    }

    pub fn is_seller(&self) -> bool {
        self.role == UserRole::Seller
    }
}
