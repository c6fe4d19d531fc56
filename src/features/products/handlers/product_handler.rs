use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::services::ProductService;
use crate::shared::validation::parse_id;

/// List all products
#[utoipa::path(
    get,
    path = "/product",
    responses(
        (status = 200, description = "List of products", body = Vec<ProductResponseDto>),
        (status = 500, description = "Store error")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<Vec<ProductResponseDto>>> {
    let products = service.list().await?;
    Ok(Json(products))
}

/// Get single product by id
#[utoipa::path(
    get,
    path = "/product/{id}",
    params(
        ("id" = String, Path, description = "Product id, digits only")
    ),
    responses(
        (status = 200, description = "Product, or null when the id matches nothing", body = ProductResponseDto),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store error")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<Option<ProductResponseDto>>> {
    let id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("invalid id parameter".to_string()))?;

    let product = service.get(id).await?;
    Ok(Json(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/product",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Created product", body = ProductResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Store error")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ProductResponseDto>)> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.to_message()));
    }

    let product = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update an existing product
#[utoipa::path(
    put,
    path = "/product",
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Updated product, or null when the id matches nothing", body = ProductResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Store error")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<UpdateProductDto>,
) -> Result<Json<Option<ProductResponseDto>>> {
    let errors = dto.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.to_message()));
    }

    let product = service.update(dto).await?;
    Ok(Json(product))
}

/// Delete single product by id
#[utoipa::path(
    delete,
    path = "/product/{id}",
    params(
        ("id" = String, Path, description = "Product id, digits only")
    ),
    responses(
        (status = 200, description = "Deleted (also when the id matched nothing)"),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store error")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
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

    use crate::features::products::routes;
    use crate::features::products::services::ProductService;

    fn test_server() -> TestServer {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/storefront")
            .unwrap();
        TestServer::new(routes::routes(Arc::new(ProductService::new(pool)))).unwrap()
    }

    #[tokio::test]
    async fn create_names_every_failing_field() {
        let server = test_server();
        let response = server
            .post("/product")
            .json(&json!({
                "categoryId": "one",
                "productName": "",
                "stock": -2,
                "price": -1.0
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["error"],
            "invalid categoryId; invalid productName; invalid stock; invalid price; "
        );
    }

    #[tokio::test]
    async fn get_with_decimal_id_is_rejected() {
        let server = test_server();
        let response = server.get("/product/1.5").await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "invalid id parameter");
    }

    #[tokio::test]
    async fn type_mismatched_body_is_a_bad_request() {
        let server = test_server();
        let response = server
            .post("/product")
            .json(&json!({ "productName": 42 }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON data"));
    }
}
