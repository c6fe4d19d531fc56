use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserListQuery, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::validation::parse_id;

/// List users, optionally filtered
///
/// Recognized filter keys are id, firstName, lastName, email and role; all
/// present filters must match. Unrecognized keys are ignored.
#[utoipa::path(
    get,
    path = "/user",
    params(UserListQuery),
    responses(
        (status = 200, description = "List of matching users", body = Vec<UserResponseDto>),
        (status = 400, description = "Malformed id filter"),
        (status = 500, description = "Store error")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserResponseDto>>> {
    let users = service.list(&query).await?;
    Ok(Json(users))
}

/// Get single user by id
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(
        ("id" = String, Path, description = "User id, digits only")
    ),
    responses(
        (status = 200, description = "User, or null when the id matches nothing", body = UserResponseDto),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store error")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<Option<UserResponseDto>>> {
    let id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("invalid id parameter".to_string()))?;

    let user = service.get(id).await?;
    Ok(Json(user))
}

/// Create a new user
///
/// A duplicate email is refused with the `user already exists` validation
/// error and persists nothing.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Created user", body = UserResponseDto),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 500, description = "Store error")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponseDto>)> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.to_message()));
    }

    let user = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/user",
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user, or null when the id matches nothing", body = UserResponseDto),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 500, description = "Store error")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<Option<UserResponseDto>>> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.to_message()));
    }

    let user = service.update(dto).await?;
    Ok(Json(user))
}

/// Delete single user by id
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(
        ("id" = String, Path, description = "User id, digits only")
    ),
    responses(
        (status = 200, description = "Deleted (also when the id matched nothing)"),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store error")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("invalid id parameter".to_string()))?;

    service.delete(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    use crate::features::users::routes;
    use crate::features::users::services::UserService;

    fn test_server() -> TestServer {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/storefront")
            .unwrap();
        TestServer::new(routes::routes(Arc::new(UserService::new(pool)))).unwrap()
    }

    #[tokio::test]
    async fn create_with_empty_body_lists_all_required_fields() {
        let server = test_server();
        let response = server.post("/user").json(&json!({})).await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["error"],
            "invalid firstName; invalid lastName; invalid email; invalid password; "
        );
    }

    #[tokio::test]
    async fn create_with_bad_email_names_the_field() {
        let server = test_server();
        let response = server
            .post("/user")
            .json(&json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "not-an-email",
                "password": "secret",
                "role": "admin"
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "invalid email; ");
    }

    #[tokio::test]
    async fn list_with_non_digit_id_filter_is_rejected() {
        let server = test_server();
        let response = server.get("/user").add_query_param("id", "12a").await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "invalid id parameter");
    }

    #[tokio::test]
    async fn delete_with_non_digit_id_is_rejected() {
        let server = test_server();
        let response = server.delete("/user/12x").await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "invalid id parameter");
    }
}
