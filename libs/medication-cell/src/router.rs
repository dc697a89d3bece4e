use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, MedicationState};
use crate::services::notifications::NotificationService;
use crate::services::schedule::MedicationScheduleService;

/// Schedules and reminder feeds are per-user; everything requires auth.
pub fn medication_routes(
    config: Arc<AppConfig>,
    schedules: MedicationScheduleService,
    notifications: NotificationService,
) -> Router {
    let state = MedicationState {
        schedules,
        notifications,
    };

    Router::new()
        .route("/", get(handlers::list_schedules))
        .route("/", post(handlers::add_schedule))
        .route("/{schedule_id}/taken", post(handlers::mark_taken))
        .route("/{schedule_id}/toggle", post(handlers::toggle_schedule))
        .route("/{schedule_id}", delete(handlers::delete_schedule))
        .route("/reminders", get(handlers::list_reminders))
        .route("/reminders/{reminder_id}/read", post(handlers::mark_reminder_read))
        .route("/reminders/{reminder_id}", delete(handlers::remove_reminder))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(state)
}
