use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::core::repository::CrudRepository;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::models::Product;
use crate::shared::validation::{escape, parse_id};

const TABLE: &str = "products";
const COLUMNS: &str = "id, category_id, product_name, description, stock, price";

/// Service for product operations
pub struct ProductService {
    repo: CrudRepository<Product>,
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: CrudRepository::new(pool.clone(), TABLE, COLUMNS),
            pool,
        }
    }

    /// List all products
    pub async fn list(&self) -> Result<Vec<ProductResponseDto>> {
        let products = self.repo.list().await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    /// Get a product by id; a missing row is an empty result, not an error
    pub async fn get(&self, id: i32) -> Result<Option<ProductResponseDto>> {
        let product = self.repo.get(id).await?;
        Ok(product.map(Into::into))
    }

    /// Insert and return the created row in one statement.
    ///
    /// The category reference is checked by the store schema, not here.
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let category_id = parse_id(&dto.category_id)
            .ok_or_else(|| AppError::Validation("invalid categoryId; ".to_string()))?;
        let stock = dto
            .stock
            .ok_or_else(|| AppError::Validation("invalid stock; ".to_string()))?;
        let price = dto
            .price
            .ok_or_else(|| AppError::Validation("invalid price; ".to_string()))?;

        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (category_id, product_name, description, stock, price) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, category_id, product_name, description, stock, price",
        )
        .bind(category_id)
        .bind(escape(&dto.product_name))
        .bind(dto.description.as_deref().map(escape))
        .bind(stock)
        .bind(price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create product: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(product.into())
    }

    /// Update and return the new row; None when the id matched nothing
    pub async fn update(&self, dto: UpdateProductDto) -> Result<Option<ProductResponseDto>> {
        let id = parse_id(&dto.id)
            .ok_or_else(|| AppError::Validation("invalid id; ".to_string()))?;
        let category_id = parse_id(&dto.category_id)
            .ok_or_else(|| AppError::Validation("invalid categoryId; ".to_string()))?;
        let stock = dto
            .stock
            .ok_or_else(|| AppError::Validation("invalid stock; ".to_string()))?;
        let price = dto
            .price
            .ok_or_else(|| AppError::Validation("invalid price; ".to_string()))?;

        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET category_id = $1, product_name = $2, description = $3, \
             stock = $4, price = $5 \
             WHERE id = $6 \
             RETURNING id, category_id, product_name, description, stock, price",
        )
        .bind(category_id)
        .bind(escape(&dto.product_name))
        .bind(dto.description.as_deref().map(escape))
        .bind(stock)
        .bind(price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(product.map(Into::into))
    }

    /// Delete by id; deleting an absent id still succeeds
    pub async fn delete(&self, id: i32) -> Result<()> {
        self.repo.delete(id).await?;
        Ok(())
    }
}
