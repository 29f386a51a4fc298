//! Registration orchestration on top of the OTP policy engine
//!
//! Validates raw payloads, rejects already registered emails, drives the
//! engine through issuance or verification and persists the account once
//! the email is proven.

mod service;


pub use service::RegistrationService;
