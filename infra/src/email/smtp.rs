//! SMTP delivery of templated emails

use async_trait::async_trait;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use vg_core::services::otp::NotificationSender;
use vg_shared::utils::mask::mask_email;
use vg_shared::EmailConfig;

use super::template::EmailTemplates;
use crate::InfrastructureError;

/// Email sender backed by an SMTP relay
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    templates: EmailTemplates,
}

impl SmtpEmailSender {
    /// Build the transport and load templates from `config.template_dir`
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let templates = EmailTemplates::from_dir(&config.template_dir)?;
        Self::with_templates(config, templates)
    }

    pub fn with_templates(
        config: &EmailConfig,
        templates: EmailTemplates,
    ) -> Result<Self, InfrastructureError> {
        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        let builder = if config.use_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        }
        .map_err(|e| {
            InfrastructureError::Config(format!("Failed to create SMTP transport: {}", e))
        })?;

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            starttls = config.use_starttls,
            "SMTP email sender configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
            templates,
        })
    }

    fn build_message(&self, to: &str, subject: &str, html: String) -> Result<Message, InfrastructureError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::alternative().singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_HTML)
                        .body(html),
                ),
            )
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }

    async fn deliver(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<(), InfrastructureError> {
        let html = self.templates.render(template_id, variables)?;
        let message = self.build_message(recipient, subject, html)?;

        debug!(to = %mask_email(recipient), template = %template_id, "Sending template email");

        self.transport
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Email(format!("Failed to send email: {}", e)))?;

        info!(
            to = %mask_email(recipient),
            template = %template_id,
            "Template email sent successfully"
        );
        Ok(())
    }
}

#[async_trait]
impl NotificationSender for SmtpEmailSender {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<(), String> {
        self.deliver(recipient, subject, template_id, variables)
            .await
            .map_err(|e| e.to_string())
    }
}
