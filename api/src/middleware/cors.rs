//! CORS configuration for browser clients
//!
//! Development allows any origin. Staging and production only accept the
//! origins listed in `ALLOWED_ORIGINS`.
//!
//! # Environment Variables
//! - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins
//! - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use vg_shared::Environment;

const DEFAULT_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    if environment.is_development() {
        create_development_cors(max_age)
    } else {
        let origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();
        create_restricted_cors(&allowed_origins(&origins), max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::debug!("Configuring permissive CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
}

fn create_restricted_cors(origins: &[String], max_age: usize) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age);

    if origins.is_empty() {
        tracing::warn!("ALLOWED_ORIGINS is empty; cross-origin requests will be rejected");
    }
    for origin in origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}

/// Split a comma-separated origin list, dropping blanks
fn allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
