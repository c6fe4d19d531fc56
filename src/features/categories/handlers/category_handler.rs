use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::validation::parse_id;

/// List all categories
#[utoipa::path(
    get,
    path = "/category",
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponseDto>),
        (status = 500, description = "Store error")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<Vec<CategoryResponseDto>>> {
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Get single category by id
///
/// A missing row answers 200 with a null body rather than 404.
#[utoipa::path(
    get,
    path = "/category/{id}",
    params(
        ("id" = String, Path, description = "Category id, digits only")
    ),
    responses(
        (status = 200, description = "Category, or null when the id matches nothing", body = CategoryResponseDto),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store error")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<Option<CategoryResponseDto>>> {
    let id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("invalid id parameter".to_string()))?;

    let category = service.get(id).await?;
    Ok(Json(category))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Created category", body = CategoryResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Store error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<CategoryResponseDto>)> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.to_message()));
    }

    let category = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update an existing category
#[utoipa::path(
    put,
    path = "/category",
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Updated category, or null when the id matches nothing", body = CategoryResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Store error")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<Option<CategoryResponseDto>>> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.to_message()));
    }

    let category = service.update(dto).await?;
    Ok(Json(category))
}

/// Delete single category by id
#[utoipa::path(
    delete,
    path = "/category/{id}",
    params(
        ("id" = String, Path, description = "Category id, digits only")
    ),
    responses(
        (status = 200, description = "Deleted (also when the id matched nothing)"),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store error")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("invalid id parameter".to_string()))?;

    service.delete(id).await?;
    Ok(StatusCode::OK)
}
