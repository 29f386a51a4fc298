//! Domain entities representing core business objects.

pub mod registration;
pub mod user;

// Re-export commonly used types
pub use registration::{validate_registration_input, RegistrationInput, VerificationInput};
pub use user::{User, UserRole};
