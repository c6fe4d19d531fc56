use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::core::repository::CrudRepository;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::validation::{escape, parse_id};

const TABLE: &str = "categories";
const COLUMNS: &str = "id, category_name, description";

/// Service for category operations
pub struct CategoryService {
    repo: CrudRepository<Category>,
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: CrudRepository::new(pool.clone(), TABLE, COLUMNS),
            pool,
        }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repo.list().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Get a category by id; a missing row is an empty result, not an error
    pub async fn get(&self, id: i32) -> Result<Option<CategoryResponseDto>> {
        let category = self.repo.get(id).await?;
        Ok(category.map(Into::into))
    }

    /// Insert and return the created row in one statement
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (category_name, description) \
             VALUES ($1, $2) \
             RETURNING id, category_name, description",
        )
        .bind(escape(&dto.category_name))
        .bind(dto.description.as_deref().map(escape))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category.into())
    }

    /// Update and return the new row; None when the id matched nothing
    pub async fn update(&self, dto: UpdateCategoryDto) -> Result<Option<CategoryResponseDto>> {
        let id = parse_id(&dto.id)
            .ok_or_else(|| AppError::Validation("invalid id; ".to_string()))?;

        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET category_name = $1, description = $2 \
             WHERE id = $3 \
             RETURNING id, category_name, description",
        )
        .bind(escape(&dto.category_name))
        .bind(dto.description.as_deref().map(escape))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(category.map(Into::into))
    }

    /// Delete by id; deleting an absent id still succeeds
    pub async fn delete(&self, id: i32) -> Result<()> {
        self.repo.delete(id).await?;
        Ok(())
    }
}
