use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/product",
            get(handlers::list_products)
                .post(handlers::create_product)
                .put(handlers::update_product),
        )
        .route(
            "/product/{id}",
            get(handlers::get_product).delete(handlers::delete_product),
        )
        .with_state(service)
}
