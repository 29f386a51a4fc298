//! Email delivery module
//!
//! Provides the SMTP sender used in production and a mock sender that only
//! logs, selected by `EmailConfig::provider`.

pub mod mock_email;
pub mod smtp;
pub mod template;

use async_trait::async_trait;
use std::collections::HashMap;

use vg_core::services::otp::NotificationSender;
use vg_shared::{EmailConfig, EmailProvider};

pub use mock_email::{CapturedEmail, MockEmailSender};
pub use smtp::SmtpEmailSender;
pub use template::EmailTemplates;

use crate::InfrastructureError;

/// Email sender selected at startup
pub enum EmailSender {
    Smtp(SmtpEmailSender),
    Mock(MockEmailSender),
}

#[async_trait]
impl NotificationSender for EmailSender {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<(), String> {
        match self {
            EmailSender::Smtp(sender) => sender.send(recipient, subject, template_id, variables).await,
            EmailSender::Mock(sender) => sender.send(recipient, subject, template_id, variables).await,
        }
    }
}

/// Create an email sender based on configuration
///
/// SMTP misconfiguration is an error; there is no silent fallback to the
/// mock sender.
pub fn create_email_sender(config: &EmailConfig) -> Result<EmailSender, InfrastructureError> {
    match config.provider {
        EmailProvider::Smtp => Ok(EmailSender::Smtp(SmtpEmailSender::new(config)?)),
        EmailProvider::Mock => {
            tracing::warn!("Using mock email sender; codes are logged, not delivered");
            Ok(EmailSender::Mock(MockEmailSender::new()))
        }
    }
}
