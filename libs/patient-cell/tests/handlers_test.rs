use axum::extract::{Extension, Path, State};
use axum::Json;
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::handlers;
use patient_cell::models::UpdatePreferencesRequest;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

fn auth_header(test_user: &TestUser) -> TypedHeader<Authorization<Bearer>> {
    let token =
        JwtTestUtils::create_test_token(test_user, &TestConfig::default().jwt_secret, Some(1));
    TypedHeader(Authorization::bearer(&token).unwrap())
}

fn profile_row(user_id: &str) -> serde_json::Value {
    json!({
        "id": user_id,
        "full_name": "Test Patient",
        "email": "patient@example.com",
        "phone": "01234567890",
        "birth_date": "1990-06-15",
        "blood_type": "A+",
        "height_cm": 175.0,
        "weight_kg": 70.0,
        "chronic_conditions": [],
        "allergies": ["Penicillin"],
        "language": "ar",
        "theme": "light",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn profile_read_includes_derived_bmi() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let patient = TestUser::patient("patient@example.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", format!("eq.{}", patient.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row(&patient.id)])))
        .mount(&mock_server)
        .await;

    let response = handlers::get_patient(
        State(config),
        Path(patient.id.clone()),
        auth_header(&patient),
        Extension(patient.to_user()),
    )
    .await
    .unwrap();
    let body = response.0;

    assert_eq!(body["success"], true);
    assert_eq!(body["bmi_category"], "normal");
    let bmi = body["bmi"].as_f64().unwrap();
    assert!((bmi - 22.857).abs() < 0.01);
}

#[tokio::test]
async fn patients_cannot_read_a_strangers_profile() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let patient = TestUser::patient("patient@example.com");

    let result = handlers::get_patient(
        State(config),
        Path("someone-else".to_string()),
        auth_header(&patient),
        Extension(patient.to_user()),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn doctors_can_read_a_patients_profile() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let doctor = TestUser::doctor("doctor@example.com");
    let patient = TestUser::patient("patient@example.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row(&patient.id)])))
        .mount(&mock_server)
        .await;

    let response = handlers::get_patient(
        State(config),
        Path(patient.id.clone()),
        auth_header(&doctor),
        Extension(doctor.to_user()),
    )
    .await;
    assert!(response.is_ok());
}

#[tokio::test]
async fn preference_updates_are_owner_only() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let doctor = TestUser::doctor("doctor@example.com");

    let result = handlers::update_preferences(
        State(config),
        Path("a-patient".to_string()),
        auth_header(&doctor),
        Extension(doctor.to_user()),
        Json(UpdatePreferencesRequest {
            language: None,
            theme: None,
        }),
    )
    .await;
    assert!(result.is_err());
}
