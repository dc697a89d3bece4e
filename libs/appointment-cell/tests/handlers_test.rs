use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::Json;
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::handlers::{self, AppointmentState};
use appointment_cell::models::{
    SelectDateRequest, SelectDoctorRequest, SelectTimeRequest, SetReasonRequest,
};
use appointment_cell::services::draft::DraftService;
use doctor_cell::services::directory::DoctorDirectory;
use shared_models::auth::User;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

fn state_for(mock_server: &MockServer) -> AppointmentState {
    AppointmentState {
        config: TestConfig::with_url(&mock_server.uri()).to_arc(),
        directory: Arc::new(DoctorDirectory::with_seed_catalog()),
        drafts: DraftService::new(),
    }
}

fn user_extension(test_user: &TestUser) -> Extension<User> {
    Extension(test_user.to_user())
}

fn auth_header(test_user: &TestUser) -> TypedHeader<Authorization<Bearer>> {
    let token =
        JwtTestUtils::create_test_token(test_user, &TestConfig::default().jwt_secret, Some(1));
    TypedHeader(Authorization::bearer(&token).unwrap())
}

async fn mock_appointment_insert(mock_server: &MockServer, patient_id: &str) {
    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {
                "id": Uuid::new_v4(),
                "patient_id": patient_id,
                "doctor_id": 1,
                "appointment_date": (Utc::now().date_naive() + Duration::days(7)).format("%Y-%m-%d").to_string(),
                "appointment_time": "09:00",
                "appointment_type": "clinic",
                "reason": "Chest pain",
                "status": "pending",
                "created_at": "2026-01-01T00:00:00Z"
            }
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn full_booking_flow_confirms_and_discards_the_draft() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server);
    let patient = TestUser::patient("patient@example.com");
    mock_appointment_insert(&mock_server, &patient.id).await;

    let booking_date = Utc::now().date_naive() + Duration::days(7);

    handlers::select_doctor(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectDoctorRequest { doctor_id: 1 }),
    )
    .await
    .unwrap();

    handlers::select_date(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectDateRequest { date: booking_date }),
    )
    .await
    .unwrap();

    handlers::select_time(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectTimeRequest {
            time: "09:00".to_string(),
        }),
    )
    .await
    .unwrap();

    handlers::set_reason(
        State(state.clone()),
        user_extension(&patient),
        Json(SetReasonRequest {
            reason: "Chest pain".to_string(),
        }),
    )
    .await
    .unwrap();

    let response = handlers::confirm_booking(
        State(state.clone()),
        auth_header(&patient),
        user_extension(&patient),
    )
    .await
    .unwrap();
    let body = response.0;

    assert_eq!(body["success"], true);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Dr. Ahmed Hassan"));
    assert!(message.contains("09:00"));

    // The draft was consumed: confirming again is ineffective.
    let second = handlers::confirm_booking(
        State(state.clone()),
        auth_header(&patient),
        user_extension(&patient),
    )
    .await;
    assert!(second.is_err());
}

#[tokio::test]
async fn confirm_is_ineffective_while_the_draft_is_incomplete() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server);
    let patient = TestUser::patient("patient@example.com");

    // Doctor and date set, no time.
    handlers::select_doctor(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectDoctorRequest { doctor_id: 3 }),
    )
    .await
    .unwrap();
    handlers::select_date(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectDateRequest {
            date: Utc::now().date_naive() + Duration::days(1),
        }),
    )
    .await
    .unwrap();

    let result = handlers::confirm_booking(
        State(state.clone()),
        auth_header(&patient),
        user_extension(&patient),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn selecting_an_unknown_doctor_is_not_found() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server);
    let patient = TestUser::patient("patient@example.com");

    let result = handlers::select_doctor(
        State(state),
        user_extension(&patient),
        Json(SelectDoctorRequest { doctor_id: 999 }),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn past_booking_dates_are_rejected() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server);
    let patient = TestUser::patient("patient@example.com");

    let result = handlers::select_date(
        State(state),
        user_extension(&patient),
        Json(SelectDateRequest {
            date: Utc::now().date_naive() - Duration::days(1),
        }),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn switching_doctors_drops_a_slot_the_new_doctor_does_not_offer() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server);
    let patient = TestUser::patient("patient@example.com");

    handlers::select_doctor(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectDoctorRequest { doctor_id: 1 }),
    )
    .await
    .unwrap();
    handlers::select_time(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectTimeRequest {
            time: "09:00".to_string(),
        }),
    )
    .await
    .unwrap();

    // Doctor 2 does not offer 09:00.
    let response = handlers::select_doctor(
        State(state.clone()),
        user_extension(&patient),
        Json(SelectDoctorRequest { doctor_id: 2 }),
    )
    .await
    .unwrap();
    let body = response.0;

    assert_eq!(body["draft"]["time"], serde_json::Value::Null);
    assert_eq!(body["is_complete"], false);
}

#[tokio::test]
async fn patients_cannot_read_other_patients_appointments() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server);
    let patient = TestUser::patient("patient@example.com");

    let result = handlers::get_patient_appointments(
        State(state),
        axum::extract::Path("someone-else".to_string()),
        auth_header(&patient),
        user_extension(&patient),
    )
    .await;
    assert!(result.is_err());
}
