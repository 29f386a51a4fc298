use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use vg_api::{create_app, telemetry, AppState};
use vg_core::services::{OtpPolicyEngine, RegistrationService};
use vg_infra::{create_email_sender, create_otp_store, create_user_store};
use vg_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.logging)?;

    info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting VerifyGate API server"
    );

    let store = create_otp_store(&config.cache)
        .await
        .context("failed to initialize OTP store")?;
    let store_backend = store.backend();
    let sender = create_email_sender(&config.email).context("failed to initialize email sender")?;
    let users = Arc::new(
        create_user_store(&config.database)
            .await
            .context("failed to initialize user store")?,
    );

    let otp_engine = OtpPolicyEngine::new(Arc::new(store), Arc::new(sender));
    let registration = RegistrationService::new(Arc::clone(&users), otp_engine, config.registration.clone());
    let app_state = web::Data::new(AppState::new(registration, store_backend));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, store = store_backend, "Server will bind");

    let environment = config.environment;
    let mut server = HttpServer::new(move || create_app(app_state.clone(), environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped, releasing connections");
    users.close().await;

    Ok(())
}
