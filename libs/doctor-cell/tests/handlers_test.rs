use std::sync::Arc;

use axum::extract::{Path, Query, State};

use doctor_cell::handlers::{self, DoctorState};
use doctor_cell::models::DoctorListQuery;
use doctor_cell::services::directory::DoctorDirectory;

fn directory_state() -> DoctorState {
    DoctorState {
        directory: Arc::new(DoctorDirectory::with_seed_catalog()),
    }
}

#[tokio::test]
async fn list_doctors_returns_full_catalog() {
    let state = directory_state();
    let query = Query(DoctorListQuery {
        specialty: None,
        sort: None,
    });

    let response = handlers::list_doctors(State(state), query).await.unwrap();
    let body = response.0;

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn list_doctors_filters_by_exact_specialty() {
    let state = directory_state();
    let query = Query(DoctorListQuery {
        specialty: Some("Pediatrics".to_string()),
        sort: None,
    });

    let response = handlers::list_doctors(State(state), query).await.unwrap();
    let body = response.0;

    assert_eq!(body["count"], 1);
    assert_eq!(body["doctors"][0]["specialty"], "Pediatrics");
}

#[tokio::test]
async fn get_unknown_doctor_is_an_error() {
    let state = directory_state();

    let result = handlers::get_doctor(State(state), Path(404)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn slots_endpoint_returns_the_doctors_slot_strings() {
    let state = directory_state();

    let response = handlers::get_doctor_slots(State(state), Path(2))
        .await
        .unwrap();
    let body = response.0;

    assert_eq!(body["doctor_id"], 2);
    assert_eq!(
        body["available_slots"]
            .as_array()
            .map(|slots| slots.len())
            .unwrap_or_default(),
        4
    );
}
