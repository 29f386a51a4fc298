use actix_web::{web, HttpResponse};

use vg_core::repositories::UserRepository;
use vg_core::services::otp::{ExpiringStore, NotificationSender};
use vg_shared::HealthResponse;

use crate::app::AppState;

/// Handler for GET /health
pub async fn health_check<U, S, N>(state: web::Data<AppState<U, S, N>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "verify-gate-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store_backend.to_string(),
        timestamp: chrono::Utc::now(),
    })
}
