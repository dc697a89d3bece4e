use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    AddToCartRequest, CartError, CheckoutRequest, MedicationSearchQuery, UpdateQuantityRequest,
};
use crate::services::ordering::OrderingService;

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::UnknownPharmacy | CartError::UnknownMedication => {
                AppError::NotFound(e.to_string())
            }
            CartError::OutOfStock(_) => AppError::Conflict(e.to_string()),
            CartError::EmptyCart | CartError::MissingAddress => AppError::Validation(e.to_string()),
        }
    }
}

// ==============================================================================
// CATALOG HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_pharmacies(
    State(service): State<OrderingService>,
) -> Result<Json<Value>, AppError> {
    let pharmacies = service.catalog().all();
    Ok(Json(json!({
        "success": true,
        "pharmacies": pharmacies,
        "count": pharmacies.len()
    })))
}

#[axum::debug_handler]
pub async fn list_medications(
    State(service): State<OrderingService>,
    Path(pharmacy_id): Path<u32>,
    Query(query): Query<MedicationSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let pharmacy = service
        .catalog()
        .find(pharmacy_id)
        .ok_or_else(|| AppError::NotFound("Pharmacy not found".to_string()))?;

    let medications = match query.search.as_deref() {
        Some(needle) if !needle.is_empty() => {
            service.catalog().search_medications(pharmacy_id, needle)
        }
        _ => pharmacy.medications.clone(),
    };

    Ok(Json(json!({
        "success": true,
        "pharmacy_id": pharmacy_id,
        "medications": medications
    })))
}

// ==============================================================================
// CART HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_cart(
    State(service): State<OrderingService>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let summary = service.cart_summary(&user.id).await;
    Ok(Json(json!({ "success": true, "cart": summary })))
}

#[axum::debug_handler]
pub async fn add_to_cart(
    State(service): State<OrderingService>,
    Extension(user): Extension<User>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<Value>, AppError> {
    let summary = service
        .add_to_cart(&user.id, request.pharmacy_id, request.medication_id)
        .await?;
    Ok(Json(json!({ "success": true, "cart": summary })))
}

#[axum::debug_handler]
pub async fn update_quantity(
    State(service): State<OrderingService>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<Value>, AppError> {
    let summary = service
        .update_quantity(
            &user.id,
            request.pharmacy_id,
            request.medication_id,
            request.quantity,
        )
        .await;
    Ok(Json(json!({ "success": true, "cart": summary })))
}

#[axum::debug_handler]
pub async fn remove_from_cart(
    State(service): State<OrderingService>,
    Extension(user): Extension<User>,
    Path((pharmacy_id, medication_id)): Path<(u32, u32)>,
) -> Result<Json<Value>, AppError> {
    let summary = service
        .remove_from_cart(&user.id, pharmacy_id, medication_id)
        .await;
    Ok(Json(json!({ "success": true, "cart": summary })))
}

#[axum::debug_handler]
pub async fn checkout(
    State(service): State<OrderingService>,
    Extension(user): Extension<User>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<Value>, AppError> {
    let confirmation = service.checkout(&user.id, request).await?;
    Ok(Json(json!({
        "success": true,
        "order": confirmation,
        "message": confirmation.message
    })))
}
