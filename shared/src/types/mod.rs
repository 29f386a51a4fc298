//! Type definitions shared by the HTTP layer
//!
//! - `response` - JSON envelopes for success, error and health responses

pub mod response;

pub use response::{ErrorBody, HealthResponse, MessageResponse};
