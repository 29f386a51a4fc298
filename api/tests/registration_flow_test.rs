mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::create_test_context;
use vg_api::create_app;
use vg_shared::Environment;

const EMAIL: &str = "ada@example.com";

fn user_body() -> Value {
    json!({ "name": "Ada", "email": EMAIL, "password": "hunter22" })
}

fn seller_body() -> Value {
    json!({
        "name": "Ada",
        "email": EMAIL,
        "password": "hunter22",
        "phone_number": "+441234567890",
        "country": "GB"
    })
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_user_registration_round_trip() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let (status, body) = post!(app, "/api/v1/auth/user-registration", user_body());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "OTP sent to email. Please verify your account");

    let outbox = ctx.sender.outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].template_id, "user-activation-mail");

    let code: u64 = ctx.sender.last_code(EMAIL).unwrap().parse().unwrap();
    let mut verify = user_body();
    verify["otp"] = json!(code);

    let (status, body) = post!(app, "/api/v1/auth/verify-user", verify);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(ctx.users.count().await, 1);
}

#[actix_web::test]
async fn test_seller_registration_round_trip() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let (status, _) = post!(app, "/api/v1/auth/seller-registration", seller_body());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctx.sender.outbox()[0].template_id, "seller-activation-mail");

    let mut verify = seller_body();
    verify["otp"] = json!(ctx.sender.last_code(EMAIL).unwrap());

    let (status, body) = post!(app, "/api/v1/auth/verify-seller", verify);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Seller registered successfully");
}

#[actix_web::test]
async fn test_seller_missing_country_lists_field() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let mut body = seller_body();
    body.as_object_mut().unwrap().remove("country");

    let (status, body) = post!(app, "/api/v1/auth/seller-registration", body);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "MISSING_FIELD");
    assert_eq!(body["message"], "Missing required fields!");
    assert_eq!(body["details"]["fields"], json!(["country"]));
    assert!(ctx.sender.outbox().is_empty());
}

#[actix_web::test]
async fn test_invalid_email_rejected() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let mut body = user_body();
    body["email"] = json!("not-an-email");

    let (status, body) = post!(app, "/api/v1/auth/user-registration", body);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_EMAIL");
}

#[actix_web::test]
async fn test_second_request_hits_cooldown() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let (status, _) = post!(app, "/api/v1/auth/user-registration", user_body());
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post!(app, "/api/v1/auth/user-registration", user_body());
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "COOLDOWN");
    assert_eq!(ctx.sender.outbox().len(), 1);
}

#[actix_web::test]
async fn test_wrong_codes_lock_the_account() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    post!(app, "/api/v1/auth/user-registration", user_body());
    let code = ctx.sender.last_code(EMAIL).unwrap();
    let wrong = if code == "1000" { "1001" } else { "1000" };

    let mut verify = user_body();
    verify["otp"] = json!(wrong);

    let (status, body) = post!(app, "/api/v1/auth/verify-user", verify.clone());
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "WRONG_CODE");
    assert_eq!(body["details"]["attempts_remaining"], 2);

    let (_, body) = post!(app, "/api/v1/auth/verify-user", verify.clone());
    assert_eq!(body["details"]["attempts_remaining"], 1);

    let (status, body) = post!(app, "/api/v1/auth/verify-user", verify.clone());
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "TOO_MANY_ATTEMPTS");

    let (status, body) = post!(app, "/api/v1/auth/user-registration", user_body());
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "ACCOUNT_LOCKED");

    verify["otp"] = json!(code);
    let (status, body) = post!(app, "/api/v1/auth/verify-user", verify);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_OR_EXPIRED");
    assert_eq!(ctx.users.count().await, 0);
}

#[actix_web::test]
async fn test_registered_email_is_duplicate() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    post!(app, "/api/v1/auth/user-registration", user_body());
    let mut verify = user_body();
    verify["otp"] = json!(ctx.sender.last_code(EMAIL).unwrap());
    let (status, _) = post!(app, "/api/v1/auth/verify-user", verify);
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post!(app, "/api/v1/auth/user-registration", user_body());
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE_IDENTITY");
    assert_eq!(body["message"], "User already exists with this email!");
}

#[actix_web::test]
async fn test_delivery_failure_is_masked() {
    let ctx = create_test_context();
    ctx.sender.set_failing(true);
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let (status, body) = post!(app, "/api/v1/auth/user-registration", user_body());
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(ctx.store.len().await, 1);
}

#[actix_web::test]
async fn test_verify_without_otp_is_missing_field() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let (status, body) = post!(app, "/api/v1/auth/verify-user", user_body());
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_FIELD");
    assert_eq!(body["details"]["fields"], json!(["otp"]));
}

#[actix_web::test]
async fn test_malformed_json_rejected() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/user-registration")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_health_reports_store_backend() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(ctx.state.clone(), Environment::Development)).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
