use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/user",
            get(handlers::list_users)
                .post(handlers::create_user)
                .put(handlers::update_user),
        )
        .route(
            "/user/{id}",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .with_state(service)
}
