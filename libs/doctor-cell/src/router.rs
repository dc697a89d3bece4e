use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, DoctorState};
use crate::services::directory::DoctorDirectory;

/// Directory browsing is public read-only catalog data.
pub fn doctor_routes(directory: Arc<DoctorDirectory>) -> Router {
    let state = DoctorState { directory };

    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/specialties", get(handlers::list_specialties))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/slots", get(handlers::get_doctor_slots))
        .with_state(state)
}
