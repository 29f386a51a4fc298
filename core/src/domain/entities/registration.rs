//! Raw registration payloads and their validation.

use serde::{Deserialize, Serialize};
use vg_shared::validation::{is_present, is_valid_email};

use super::user::UserRole;
use crate::errors::ValidationError;

/// Raw registration request as received from a client
///
/// Every field is optional so that missing values surface as
/// `MissingField` instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
}

/// Raw verification request: the registration fields plus the submitted OTP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationInput {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
}

/// Validate a registration payload for the given role
///
/// Fails with `MissingField` unless name, email and password are present
/// (plus phone number and country for sellers), then with `InvalidEmail`
/// unless the email has a `local@domain.tld` shape.
pub fn validate_registration_input(
    raw: &RegistrationInput,
    role: UserRole,
) -> Result<(), ValidationError> {
    let mut required = vec![
        ("name", raw.name.as_deref()),
        ("email", raw.email.as_deref()),
        ("password", raw.password.as_deref()),
    ];
    if role == UserRole::Seller {
        required.push(("phone_number", raw.phone_number.as_deref()));
        required.push(("country", raw.country.as_deref()));
    }
    missing_fields(&required)?;

    let email = raw.email.as_deref().unwrap_or_default().trim();
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

impl VerificationInput {
    /// Check that every field needed to finish registration is present
    pub fn require_fields(&self, role: UserRole) -> Result<(), ValidationError> {
        let mut required = vec![
            ("email", self.email.as_deref()),
            ("otp", self.otp.as_deref()),
            ("password", self.password.as_deref()),
            ("name", self.name.as_deref()),
        ];
        if role == UserRole::Seller {
            required.push(("phone_number", self.phone_number.as_deref()));
            required.push(("country", self.country.as_deref()));
        }
        missing_fields(&required)
    }
}

fn missing_fields(required: &[(&str, Option<&str>)]) -> Result<(), ValidationError> {
    let fields: Vec<String> = required
        .iter()
        .filter(|(_, value)| !is_present(*value))
        .map(|(field, _)| field.to_string())
        .collect();

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingField { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_input() -> RegistrationInput {
        RegistrationInput {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            password: Some("s3cret!".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_role_accepts_name_email_password_only() {
        assert!(validate_registration_input(&user_input(), UserRole::User).is_ok());
    }

    #[test]
    fn test_seller_role_rejects_missing_country() {
        let input = RegistrationInput {
            phone_number: Some("+15550100".to_string()),
            ..user_input()
        };
        match validate_registration_input(&input, UserRole::Seller) {
            Err(ValidationError::MissingField { fields }) => {
                assert_eq!(fields, vec!["country".to_string()]);
            }
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_seller_role_accepts_full_input() {
        let input = RegistrationInput {
            phone_number: Some("+15550100".to_string()),
            country: Some("US".to_string()),
            ..user_input()
        };
        assert!(validate_registration_input(&input, UserRole::Seller).is_ok());
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let input = RegistrationInput {
            name: Some("  ".to_string()),
            ..user_input()
        };
        assert!(matches!(
            validate_registration_input(&input, UserRole::User),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_missing_field_checked_before_email_shape() {
        let input = RegistrationInput {
            email: Some("not-an-email".to_string()),
            password: None,
            ..user_input()
        };
        assert!(matches!(
            validate_registration_input(&input, UserRole::User),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let input = RegistrationInput {
            email: Some("jane@example".to_string()),
            ..user_input()
        };
        assert_eq!(
            validate_registration_input(&input, UserRole::User),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_verification_input_requires_otp() {
        let input = VerificationInput {
            email: Some("jane@example.com".to_string()),
            password: Some("pw".to_string()),
            name: Some("Jane".to_string()),
            ..Default::default()
        };
        match input.require_fields(UserRole::User) {
            Err(ValidationError::MissingField { fields }) => assert_eq!(fields, vec!["otp"]),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }
}
