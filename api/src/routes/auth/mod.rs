//! Registration endpoints under `/api/v1/auth`

pub mod register;
pub mod verify;

use actix_web::web;

use vg_core::repositories::UserRepository;
use vg_core::services::otp::{ExpiringStore, NotificationSender};

pub use register::{seller_registration, user_registration};
pub use verify::{verify_seller, verify_user};

/// Mount the four registration routes on a scope
pub fn configure<U, S, N>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    S: ExpiringStore + 'static,
    N: NotificationSender + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/user-registration", web::post().to(user_registration::<U, S, N>))
            .route("/verify-user", web::post().to(verify_user::<U, S, N>))
            .route("/seller-registration", web::post().to(seller_registration::<U, S, N>))
            .route("/verify-seller", web::post().to(verify_seller::<U, S, N>)),
    );
}
