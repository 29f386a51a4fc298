//! Application state and factory

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use vg_core::repositories::UserRepository;
use vg_core::services::otp::{ExpiringStore, NotificationSender};
use vg_core::services::RegistrationService;
use vg_shared::{Environment, ErrorBody};

use crate::handlers::json_error_handler;
use crate::middleware::create_cors;
use crate::routes;

/// Application state shared by every worker
pub struct AppState<U, S, N>
where
    U: UserRepository,
    S: ExpiringStore,
    N: NotificationSender,
{
    pub registration_service: Arc<RegistrationService<U, S, N>>,
    /// Name of the OTP store backend, reported by `/health`
    pub store_backend: &'static str,
}

impl<U, S, N> AppState<U, S, N>
where
    U: UserRepository,
    S: ExpiringStore,
    N: NotificationSender,
{
    pub fn new(registration_service: RegistrationService<U, S, N>, store_backend: &'static str) -> Self {
        Self {
            registration_service: Arc::new(registration_service),
            store_backend,
        }
    }
}

/// Register routes and extractor configuration
pub fn configure<U, S, N>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(routes::health::health_check::<U, S, N>))
        .service(web::scope("/api/v1").configure(routes::auth::configure::<U, S, N>));
}

/// Create the application with all middleware
pub fn create_app<U, S, N>(
    app_state: web::Data<AppState<U, S, N>>,
    environment: Environment,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    App::new()
        .app_data(app_state)
        .wrap(create_cors(environment))
        .wrap(TracingLogger::default())
        .configure(configure::<U, S, N>)
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
