//! Request bodies for the registration endpoints
//!
//! Fields stay optional so that absent values reach the domain validation
//! and come back as `MissingField` with the list of missing names.

use serde::{Deserialize, Serialize};
use validator::Validate;

use vg_core::domain::entities::registration::{RegistrationInput, VerificationInput};

/// Body of `POST /auth/user-registration` and `/auth/seller-registration`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(max = 255, message = "Name is too long"))]
    pub name: Option<String>,

    #[validate(length(max = 320, message = "Email is too long"))]
    pub email: Option<String>,

    /// bcrypt only reads the first 72 bytes
    #[validate(length(max = 72, message = "Password is too long"))]
    pub password: Option<String>,

    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone_number: Option<String>,

    #[validate(length(max = 64, message = "Country is too long"))]
    pub country: Option<String>,
}

/// A submitted code, accepted as a JSON string or number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OtpField {
    Text(String),
    Number(u64),
}

impl OtpField {
    pub fn into_string(self) -> String {
        match self {
            OtpField::Text(code) => code,
            OtpField::Number(code) => code.to_string(),
        }
    }
}

/// Body of `POST /auth/verify-user` and `/auth/verify-seller`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerificationRequest {
    #[validate(length(max = 320, message = "Email is too long"))]
    pub email: Option<String>,

    pub otp: Option<OtpField>,

    #[validate(length(max = 72, message = "Password is too long"))]
    pub password: Option<String>,

    #[validate(length(max = 255, message = "Name is too long"))]
    pub name: Option<String>,

    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone_number: Option<String>,

    #[validate(length(max = 64, message = "Country is too long"))]
    pub country: Option<String>,
}

impl From<RegistrationRequest> for RegistrationInput {
    fn from(request: RegistrationRequest) -> Self {
        RegistrationInput {
            name: request.name,
            email: request.email,
            password: request.password,
            phone_number: request.phone_number,
            country: request.country,
        }
    }
}

impl From<VerificationRequest> for VerificationInput {
    fn from(request: VerificationRequest) -> Self {
        VerificationInput {
            email: request.email,
            otp: request.otp.map(OtpField::into_string),
            password: request.password,
            name: request.name,
            phone_number: request.phone_number,
            country: request.country,
        }
    }
}
