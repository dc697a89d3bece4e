use axum::extract::{Extension, State};
use axum::Json;
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prescription_cell::handlers;
use prescription_cell::models::{CreatePrescriptionRequest, PrescriptionItem};
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

fn auth_header(test_user: &TestUser) -> TypedHeader<Authorization<Bearer>> {
    let token =
        JwtTestUtils::create_test_token(test_user, &TestConfig::default().jwt_secret, Some(1));
    TypedHeader(Authorization::bearer(&token).unwrap())
}

fn amoxicillin() -> PrescriptionItem {
    PrescriptionItem {
        name: "Amoxicillin 500mg".to_string(),
        dosage: "1 capsule".to_string(),
        frequency: "three times daily".to_string(),
        duration: "7 days".to_string(),
        instructions: Some("After meals".to_string()),
    }
}

fn create_request(patient_id: &str) -> CreatePrescriptionRequest {
    CreatePrescriptionRequest {
        patient_id: patient_id.to_string(),
        appointment_id: None,
        diagnosis: "Tonsillitis".to_string(),
        medications: vec![amoxicillin()],
        notes: None,
    }
}

#[tokio::test]
async fn patients_cannot_author_prescriptions() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let patient = TestUser::patient("patient@example.com");

    let result = handlers::create_prescription(
        State(config),
        auth_header(&patient),
        Extension(patient.to_user()),
        Json(create_request("someone")),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn doctors_can_author_a_valid_prescription() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let doctor = TestUser::doctor("doctor@example.com");
    let patient = TestUser::patient("patient@example.com");

    Mock::given(method("POST"))
        .and(path("/rest/v1/prescriptions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::prescription_response(&doctor.id, &patient.id)
        ])))
        .mount(&mock_server)
        .await;

    let response = handlers::create_prescription(
        State(config),
        auth_header(&doctor),
        Extension(doctor.to_user()),
        Json(create_request(&patient.id)),
    )
    .await
    .unwrap();
    let body = response.0;

    assert_eq!(body["success"], true);
    assert_eq!(body["prescription"]["patient_id"], patient.id.as_str());
}

#[tokio::test]
async fn an_empty_diagnosis_is_rejected_before_reaching_the_backend() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let doctor = TestUser::doctor("doctor@example.com");

    let mut request = create_request("patient-1");
    request.diagnosis = "".to_string();

    let result = handlers::create_prescription(
        State(config),
        auth_header(&doctor),
        Extension(doctor.to_user()),
        Json(request),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn patients_read_their_own_prescriptions() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_arc();
    let doctor = TestUser::doctor("doctor@example.com");
    let patient = TestUser::patient("patient@example.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/prescriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::prescription_response(&doctor.id, &patient.id)
        ])))
        .mount(&mock_server)
        .await;

    let response = handlers::get_patient_prescriptions(
        State(config),
        axum::extract::Path(patient.id.clone()),
        auth_header(&patient),
        Extension(patient.to_user()),
    )
    .await
    .unwrap();
    let body = response.0;

    assert_eq!(body["count"], 1);
}
