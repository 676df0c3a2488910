use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::core::middleware::{auth_middleware, optional_auth_middleware};
use crate::features::auth::JwtValidator;
use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Every category route with its auth layer attached
pub fn router(service: Arc<CategoryService>, validator: Arc<JwtValidator>) -> Router {
    let protected = protected_routes(Arc::clone(&service)).route_layer(from_fn_with_state(
        Arc::clone(&validator),
        auth_middleware,
    ));
    let public = public_routes(service)
        .route_layer(from_fn_with_state(validator, optional_auth_middleware));

    Router::new().merge(protected).merge(public)
}

/// Read-only category routes.
///
/// A token is optional here; listing beyond the active scope needs one.
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .route("/categories/{id}", get(handlers::get_category))
        .with_state(service)
}

/// Category routes that mutate or expose the trash.
///
/// Handlers require an `AuthenticatedUser`; mount behind the JWT middleware.
pub fn protected_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/categories", post(handlers::create_category))
        .route("/categories/trash", get(handlers::list_trashed_categories))
        .route(
            "/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route("/categories/{id}/restore", post(handlers::restore_category))
        .route(
            "/categories/{id}/permanent",
            delete(handlers::delete_category_permanent),
        )
        .with_state(service)
}
