use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::handlers;
use auth_cell::models::{SignInRequest, SignUpRequest, UserType};
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Authorization", format!("Bearer {}", token).parse().unwrap());
    headers
}

fn patient_sign_up() -> SignUpRequest {
    SignUpRequest {
        email: "patient@example.com".to_string(),
        password: "longenough".to_string(),
        phone: "01234567890".to_string(),
        full_name: "Test Patient".to_string(),
        user_type: UserType::Patient,
        specialty: None,
        license_number: None,
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
    }
}

#[tokio::test]
async fn sign_up_creates_the_account_and_role_record() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let user = TestUser::patient("patient@example.com");

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockSupabaseResponses::auth_session_response(&user.id, &user.email),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "user_id": user.id, "birth_date": "1990-01-01" }
        ])))
        .mount(&mock_server)
        .await;

    let response = handlers::sign_up(State(config), Json(patient_sign_up()))
        .await
        .unwrap();
    let body = response.0;

    assert_eq!(body["success"], true);
    assert_eq!(body["session"]["user"]["id"], user.id.as_str());
}

#[tokio::test]
async fn sign_up_rejects_a_short_password_locally() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();

    let mut request = patient_sign_up();
    request.password = "short".to_string();

    let result = handlers::sign_up(State(config), Json(request)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn sign_in_surfaces_the_backend_session() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let user = TestUser::patient("patient@example.com");

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockSupabaseResponses::auth_session_response(&user.id, &user.email),
        ))
        .mount(&mock_server)
        .await;

    let response = handlers::sign_in(
        State(config),
        Json(SignInRequest {
            email: user.email.clone(),
            password: "longenough".to_string(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.0["session"]["access_token"], "test-access-token");
}

#[tokio::test]
async fn sign_in_failure_maps_to_an_auth_error() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            MockSupabaseResponses::error_response("Invalid login credentials", "invalid_grant"),
        ))
        .mount(&mock_server)
        .await;

    let result = handlers::sign_in(
        State(config),
        Json(SignInRequest {
            email: "patient@example.com".to_string(),
            password: "wrong-password".to_string(),
        }),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn validate_reports_a_good_token_as_valid() {
    let mock_server = MockServer::start().await;
    let test_config = TestConfig::with_url(&mock_server.uri());
    let config = test_config.to_arc();
    let user = TestUser::patient("patient@example.com");

    let token = JwtTestUtils::create_test_token(&user, &test_config.jwt_secret, Some(1));
    let response = handlers::validate_token(State(config), bearer_headers(&token))
        .await
        .unwrap();

    assert_eq!(response.0["token"]["valid"], true);
    assert_eq!(response.0["token"]["user_id"], user.id.as_str());
}

#[tokio::test]
async fn validate_reports_expired_and_forged_tokens_as_invalid() {
    let mock_server = MockServer::start().await;
    let test_config = TestConfig::with_url(&mock_server.uri());
    let user = TestUser::patient("patient@example.com");

    let expired = JwtTestUtils::create_expired_token(&user, &test_config.jwt_secret);
    let response = handlers::validate_token(State(test_config.to_arc()), bearer_headers(&expired))
        .await
        .unwrap();
    assert_eq!(response.0["token"]["valid"], false);

    let forged = JwtTestUtils::create_invalid_signature_token(&user);
    let response = handlers::validate_token(
        State(TestConfig::with_url(&mock_server.uri()).to_arc()),
        bearer_headers(&forged),
    )
    .await
    .unwrap();
    assert_eq!(response.0["token"]["valid"], false);
}
