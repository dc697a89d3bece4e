use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use doctor_cell::services::directory::DoctorDirectory;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, AppointmentState};
use crate::services::draft::DraftService;

/// All appointment operations require authentication.
pub fn appointment_routes(
    config: Arc<AppConfig>,
    directory: Arc<DoctorDirectory>,
    drafts: DraftService,
) -> Router {
    let state = AppointmentState {
        config: config.clone(),
        directory,
        drafts,
    };

    Router::new()
        // Booking draft flow: doctor -> date -> time -> confirm
        .route("/draft", get(handlers::get_draft))
        .route("/draft/doctor", put(handlers::select_doctor))
        .route("/draft/date", put(handlers::select_date))
        .route("/draft/time", put(handlers::select_time))
        .route("/draft/reason", put(handlers::set_reason))
        .route("/confirm", post(handlers::confirm_booking))
        // Appointment listings and lifecycle
        .route("/patients/{patient_id}", get(handlers::get_patient_appointments))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/{appointment_id}/status", patch(handlers::update_appointment_status))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(state)
}
