//! Registration flow configuration

use serde::{Deserialize, Serialize};

/// Templates and hashing parameters for the registration flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    /// Email template sent to generic users
    #[serde(default = "default_user_template")]
    pub user_template: String,

    /// Email template sent to sellers
    #[serde(default = "default_seller_template")]
    pub seller_template: String,

    /// bcrypt cost factor (4..=31)
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            user_template: default_user_template(),
            seller_template: default_seller_template(),
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl RegistrationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_template: std::env::var("USER_ACTIVATION_TEMPLATE")
                .unwrap_or(defaults.user_template),
            seller_template: std::env::var("SELLER_ACTIVATION_TEMPLATE")
                .unwrap_or(defaults.seller_template),
            password_hash_cost: std::env::var("PASSWORD_HASH_COST")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(defaults.password_hash_cost),
        }
    }
}

fn default_user_template() -> String {
    String::from("user-activation-mail")
}

fn default_seller_template() -> String {
    String::from("seller-activation-mail")
}

fn default_password_hash_cost() -> u32 {
    10
}
