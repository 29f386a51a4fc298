use actix_web::{web, HttpResponse};
use validator::Validate;

use vg_core::domain::entities::{RegistrationInput, UserRole};
use vg_core::repositories::UserRepository;
use vg_core::services::otp::{ExpiringStore, NotificationSender};
use vg_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::RegistrationRequest;
use crate::handlers::ApiError;

const OTP_SENT_MESSAGE: &str = "OTP sent to email. Please verify your account";

/// Handler for POST /api/v1/auth/user-registration
///
/// # Request Body
///
/// ```json
/// { "name": "Ada", "email": "ada@example.com", "password": "secret" }
/// ```
///
/// Responds `200 {"success": true, "message": "OTP sent to email. ..."}` once
/// the code has been delivered.
pub async fn user_registration<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<RegistrationRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    start(state, request.into_inner(), UserRole::User).await
}

/// Handler for POST /api/v1/auth/seller-registration
///
/// Same as the user variant, with `phone_number` and `country` required.
pub async fn seller_registration<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<RegistrationRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    start(state, request.into_inner(), UserRole::Seller).await
}

async fn start<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: RegistrationRequest,
    role: UserRole,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    request.validate()?;
    let input = RegistrationInput::from(request);

    state
        .registration_service
        .start_registration(&input, role)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok(OTP_SENT_MESSAGE)))
}
