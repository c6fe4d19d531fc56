use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/category",
            get(handlers::list_categories)
                .post(handlers::create_category)
                .put(handlers::update_category),
        )
        .route(
            "/category/{id}",
            get(handlers::get_category).delete(handlers::delete_category),
        )
        .with_state(service)
}
