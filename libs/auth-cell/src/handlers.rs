use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_utils::jwt;

use crate::models::{SignInRequest, SignUpRequest};
use crate::services::account::AccountService;

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    auth_value
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))
}

#[axum::debug_handler]
pub async fn sign_up(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AccountService::new(&config);

    service
        .validate_sign_up(&request)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service
        .sign_up(request)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "session": session
    })))
}

#[axum::debug_handler]
pub async fn sign_in(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AccountService::new(&config);

    let session = service
        .sign_in(&request.email, &request.password)
        .await
        .map_err(|e| AppError::Auth(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "session": session
    })))
}

#[axum::debug_handler]
pub async fn sign_out(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let token = extract_bearer_token(&headers)?;

    let service = AccountService::new(&config);
    service
        .sign_out(&token)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({ "success": true })))
}

/// The authenticated session: locally decoded claims plus the backend's
/// account record.
#[axum::debug_handler]
pub async fn get_session(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    debug!("Getting session for user: {}", user.id);

    let token = extract_bearer_token(&headers)?;
    let client = SupabaseClient::new(&config);

    let account = client
        .get_user_account(&token)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "user": user,
        "account": account
    })))
}

/// Token-validity probe; never errors on an invalid token.
#[axum::debug_handler]
pub async fn validate_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let token = extract_bearer_token(&headers)?;

    match jwt::validate_token(&token, &config.supabase_jwt_secret) {
        Ok(user) => {
            let response = TokenResponse {
                valid: true,
                user_id: user.id,
                email: user.email,
                role: user.role,
            };
            Ok(Json(json!({ "success": true, "token": response })))
        }
        Err(_) => Ok(Json(json!({ "success": true, "token": { "valid": false } }))),
    }
}
