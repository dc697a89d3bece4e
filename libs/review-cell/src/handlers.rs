use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{ReviewError, ReviewFilterQuery, SubmitReviewRequest};
use crate::services::review::ReviewService;

#[derive(Clone)]
pub struct ReviewState {
    pub reviews: Arc<ReviewService>,
}

impl From<ReviewError> for AppError {
    fn from(e: ReviewError) -> Self {
        AppError::Validation(e.to_string())
    }
}

#[axum::debug_handler]
pub async fn list_reviews(
    State(state): State<ReviewState>,
    Query(query): Query<ReviewFilterQuery>,
) -> Result<Json<Value>, AppError> {
    let reviews = state.reviews.filtered(query.category, query.rating);
    Ok(Json(json!({
        "success": true,
        "reviews": reviews,
        "count": reviews.len()
    })))
}

#[axum::debug_handler]
pub async fn get_stats(State(state): State<ReviewState>) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "success": true,
        "stats": state.reviews.stats()
    })))
}

/// Accepts or rejects a submission; on success the client resets its form.
#[axum::debug_handler]
pub async fn submit_review(
    State(state): State<ReviewState>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<Json<Value>, AppError> {
    state.reviews.submit(&request)?;
    Ok(Json(json!({
        "success": true,
        "message": "Review submitted"
    })))
}
