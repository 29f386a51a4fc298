//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// Email provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Real SMTP relay
    Smtp,
    /// Log-only sender for development
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP email configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    /// Use STARTTLS instead of implicit TLS
    #[serde(default)]
    pub use_starttls: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory holding `{template}.html` files
    #[serde(default = "default_template_dir")]
    pub template_dir: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_email: String::from("no-reply@localhost"),
            from_name: String::from("VerifyGate"),
            use_starttls: true,
            timeout_secs: default_timeout_secs(),
            template_dir: default_template_dir(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.smtp_port),
            username: std::env::var("SMTP_USER").unwrap_or_default(),
            password: std::env::var("SMTP_PASS").unwrap_or_default(),
            from_email: std::env::var("SMTP_FROM_EMAIL").unwrap_or(defaults.from_email),
            from_name: std::env::var("SMTP_FROM_NAME").unwrap_or(defaults.from_name),
            use_starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.use_starttls),
            timeout_secs: defaults.timeout_secs,
            template_dir: std::env::var("EMAIL_TEMPLATE_DIR").unwrap_or(defaults.template_dir),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_template_dir() -> String {
    String::from("templates/email")
}
