//! Registration service implementation

use std::sync::Arc;

use tracing;
use vg_shared::utils::mask::mask_email;
use vg_shared::RegistrationConfig;

use crate::domain::entities::registration::{
    validate_registration_input, RegistrationInput, VerificationInput,
};
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::UserRepository;
use crate::services::otp::{ExpiringStore, NotificationSender, OtpPolicyEngine};

/// Registration service driving the two-step email verification flow
pub struct RegistrationService<U, S, N>
where
    U: UserRepository,
    S: ExpiringStore,
    N: NotificationSender,
{
    /// Repository for account persistence
    user_repository: Arc<U>,
    /// OTP policy engine
    otp_engine: OtpPolicyEngine<S, N>,
    /// Templates and hashing parameters
    config: RegistrationConfig,
}

impl<U, S, N> RegistrationService<U, S, N>
where
    U: UserRepository,
    S: ExpiringStore,
    N: NotificationSender,
{
    /// Create a new registration service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for account persistence
    /// * `otp_engine` - Policy engine sharing the OTP store
    /// * `config` - Registration configuration
    pub fn new(
        user_repository: Arc<U>,
        otp_engine: OtpPolicyEngine<S, N>,
        config: RegistrationConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_engine,
            config,
        }
    }

    /// Start registration by emailing a verification code
    ///
    /// Steps short-circuit in order: validation, duplicate check,
    /// restriction check, request tracking, issuance.
    pub async fn start_registration(
        &self,
        raw: &RegistrationInput,
        role: UserRole,
    ) -> DomainResult<()> {
        validate_registration_input(raw, role)?;

        let email = identity(&raw.email);
        let name = field(&raw.name);

        self.ensure_not_registered(email).await?;

        self.otp_engine.check_restrictions(email).await?;
        self.otp_engine.track_request(email).await?;
        self.otp_engine
            .issue_otp(name, email, self.template_for(role))
            .await?;

        tracing::info!(
            email = %mask_email(email),
            role = %role,
            event = "registration_started",
            "Verification code sent for registration"
        );

        Ok(())
    }

    /// Finish registration by verifying the code and creating the account
    pub async fn complete_registration(
        &self,
        raw: &VerificationInput,
        role: UserRole,
    ) -> DomainResult<User> {
        raw.require_fields(role)?;

        let email = identity(&raw.email);

        self.ensure_not_registered(email).await?;

        self.otp_engine
            .verify_otp(email, field(&raw.otp).trim())
            .await?;

        let password_hash =
            hash_password(field(&raw.password).to_string(), self.config.password_hash_cost)
                .await?;

        let name = field(&raw.name).to_string();
        let user = match role {
            UserRole::User => User::new(name, email.to_string(), password_hash),
            UserRole::Seller => User::new_seller(
                name,
                email.to_string(),
                password_hash,
                field(&raw.phone_number).to_string(),
                field(&raw.country).to_string(),
            ),
        };

        let user = self.user_repository.create(user).await?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(email),
            role = %role,
            event = "registration_completed",
            "Account created after email verification"
        );

        Ok(user)
    }

    fn template_for(&self, role: UserRole) -> &str {
        match role {
            UserRole::User => &self.config.user_template,
            UserRole::Seller => &self.config.seller_template,
        }
    }

    async fn ensure_not_registered(&self, email: &str) -> DomainResult<()> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            tracing::info!(
                email = %mask_email(email),
                event = "registration_duplicate",
                "Registration attempted for an existing account"
            );
            return Err(OtpError::DuplicateIdentity.into());
        }
        Ok(())
    }
}

/// Store identity for an email: surrounding whitespace removed
fn identity(email: &Option<String>) -> &str {
    field(email).trim()
}

// Presence is checked before any field is read
fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
}
