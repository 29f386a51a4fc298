use actix_web::{web, HttpResponse};
use validator::Validate;

use vg_core::domain::entities::{UserRole, VerificationInput};
use vg_core::repositories::UserRepository;
use vg_core::services::otp::{ExpiringStore, NotificationSender};
use vg_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::VerificationRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/verify-user
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "otp": "4821", "password": "secret", "name": "Ada" }
/// ```
pub async fn verify_user<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<VerificationRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    complete(state, request.into_inner(), UserRole::User).await
}

/// Handler for POST /api/v1/auth/verify-seller
pub async fn verify_seller<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<VerificationRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    complete(state, request.into_inner(), UserRole::Seller).await
}

async fn complete<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: VerificationRequest,
    role: UserRole,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    request.validate()?;
    let input = VerificationInput::from(request);

    let user = state
        .registration_service
        .complete_registration(&input, role)
        .await?;

    let message = match user.role {
        UserRole::User => "User registered successfully",
        UserRole::Seller => "Seller registered successfully",
    };
    Ok(HttpResponse::Ok().json(MessageResponse::ok(message)))
}
