use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::ordering::OrderingService;

/// Catalog browsing is public; carts and checkout are per-user.
pub fn pharmacy_routes(config: Arc<AppConfig>, ordering: OrderingService) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::list_pharmacies))
        .route("/{pharmacy_id}/medications", get(handlers::list_medications));

    let protected_routes = Router::new()
        .route("/cart", get(handlers::get_cart))
        .route("/cart/items", post(handlers::add_to_cart))
        .route("/cart/items", put(handlers::update_quantity))
        .route(
            "/cart/items/{pharmacy_id}/{medication_id}",
            delete(handlers::remove_from_cart),
        )
        .route("/checkout", post(handlers::checkout))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(ordering)
}
