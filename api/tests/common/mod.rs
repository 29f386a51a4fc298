use std::sync::Arc;

use actix_web::web;

use vg_api::AppState;
use vg_core::services::{OtpPolicyEngine, RegistrationService};
use vg_infra::{MemoryStore, MemoryUserRepository, MockEmailSender};
use vg_shared::RegistrationConfig;

/// In-process adapters plus handles for inspecting them
pub struct TestContext {
    pub state: web::Data<AppState<MemoryUserRepository, MemoryStore, MockEmailSender>>,
    pub store: MemoryStore,
    pub sender: MockEmailSender,
    pub users: MemoryUserRepository,
}

pub fn create_test_context() -> TestContext {
    let store = MemoryStore::new();
    let sender = MockEmailSender::new();
    let users = MemoryUserRepository::new();

    let engine = OtpPolicyEngine::new(Arc::new(store.clone()), Arc::new(sender.clone()));
    let config = RegistrationConfig {
        password_hash_cost: 4,
        ..Default::default()
    };
    let service = RegistrationService::new(Arc::new(users.clone()), engine, config);

    TestContext {
        state: web::Data::new(AppState::new(service, "memory")),
        store,
        sender,
        users,
    }
}
