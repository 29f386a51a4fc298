//! HTTP surface for the VerifyGate registration service

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, create_app, AppState};
