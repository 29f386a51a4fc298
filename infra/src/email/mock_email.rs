//! Mock email sender for development and tests
//!
//! Messages are logged and kept in memory instead of being delivered.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

use vg_core::services::otp::NotificationSender;
use vg_shared::utils::mask::mask_email;

/// A message captured by [`MockEmailSender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEmail {
    pub recipient: String,
    pub subject: String,
    pub template_id: String,
    pub variables: HashMap<String, String>,
}

/// Log-only email sender
#[derive(Debug, Clone, Default)]
pub struct MockEmailSender {
    outbox: Arc<Mutex<Vec<CapturedEmail>>>,
    fail: Arc<AtomicBool>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn outbox(&self) -> Vec<CapturedEmail> {
        self.outbox.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// The code most recently sent to `recipient`
    pub fn last_code(&self, recipient: &str) -> Option<String> {
        self.outbox()
            .into_iter()
            .rev()
            .find(|m| m.recipient == recipient)
            .and_then(|m| m.variables.get("otp").cloned())
    }
}

#[async_trait]
impl NotificationSender for MockEmailSender {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        template_id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("Mock email delivery failure".to_string());
        }

        info!(
            to = %mask_email(recipient),
            subject = %subject,
            template = %template_id,
            "[MOCK EMAIL] message captured"
        );

        self.outbox
            .lock()
            .map_err(|_| "Mock outbox poisoned".to_string())?
            .push(CapturedEmail {
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                template_id: template_id.to_string(),
                variables: variables.clone(),
            });
        Ok(())
    }
}
