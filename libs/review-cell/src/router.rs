use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, ReviewState};
use crate::services::review::ReviewService;

/// Browsing reviews is public; submitting one requires a signed-in user.
pub fn review_routes(config: Arc<AppConfig>, reviews: Arc<ReviewService>) -> Router {
    let state = ReviewState { reviews };

    let public_routes = Router::new()
        .route("/", get(handlers::list_reviews))
        .route("/stats", get(handlers::get_stats));

    let protected_routes = Router::new()
        .route("/", post(handlers::submit_review))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
