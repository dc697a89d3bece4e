use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AddMedicationRequest, MarkTakenRequest, ScheduleError};
use crate::services::notifications::NotificationService;
use crate::services::schedule::MedicationScheduleService;

#[derive(Clone)]
pub struct MedicationState {
    pub schedules: MedicationScheduleService,
    pub notifications: NotificationService,
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::NotFound | ScheduleError::ReminderNotFound => {
                AppError::NotFound(e.to_string())
            }
            _ => AppError::Validation(e.to_string()),
        }
    }
}

// ==============================================================================
// SCHEDULE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let schedules = state.schedules.list(&user.id, Utc::now()).await;
    Ok(Json(json!({
        "success": true,
        "schedules": schedules,
        "count": schedules.len()
    })))
}

#[axum::debug_handler]
pub async fn add_schedule(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
    Json(request): Json<AddMedicationRequest>,
) -> Result<Json<Value>, AppError> {
    let schedule = state.schedules.add(&user.id, request, Utc::now()).await?;
    Ok(Json(json!({
        "success": true,
        "schedule": schedule,
        "message": "Medication added"
    })))
}

#[axum::debug_handler]
pub async fn mark_taken(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
    Path(schedule_id): Path<Uuid>,
    Json(request): Json<MarkTakenRequest>,
) -> Result<Json<Value>, AppError> {
    let schedule = state
        .schedules
        .mark_taken(&user.id, schedule_id, &request.time, Utc::now())
        .await?;
    Ok(Json(json!({
        "success": true,
        "schedule": schedule,
        "message": "Dose recorded"
    })))
}

#[axum::debug_handler]
pub async fn toggle_schedule(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let schedule = state.schedules.toggle(&user.id, schedule_id).await?;
    Ok(Json(json!({
        "success": true,
        "schedule": schedule
    })))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.schedules.delete(&user.id, schedule_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Medication deleted"
    })))
}

// ==============================================================================
// REMINDER FEED HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_reminders(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let reminders = state.notifications.list(&user.id, Utc::now()).await;
    let unread = reminders.iter().filter(|r| !r.is_read).count();
    Ok(Json(json!({
        "success": true,
        "reminders": reminders,
        "unread_count": unread
    })))
}

#[axum::debug_handler]
pub async fn mark_reminder_read(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
    Path(reminder_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let reminder = state.notifications.mark_read(&user.id, reminder_id).await?;
    Ok(Json(json!({
        "success": true,
        "reminder": reminder
    })))
}

#[axum::debug_handler]
pub async fn remove_reminder(
    State(state): State<MedicationState>,
    Extension(user): Extension<User>,
    Path(reminder_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.notifications.remove(&user.id, reminder_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Reminder removed"
    })))
}
