use sqlx::{PgPool, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::core::filter::{push_filters, Filter};
use crate::core::repository::CrudRepository;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserListQuery, UserResponseDto};
use crate::features::users::models::User;
use crate::shared::validation::{escape, parse_id};

const TABLE: &str = "app_users";
const COLUMNS: &str = "id, first_name, last_name, email, password, role";

/// Service for user operations
pub struct UserService {
    repo: CrudRepository<User>,
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: CrudRepository::new(pool.clone(), TABLE, COLUMNS),
            pool,
        }
    }

    /// List users, restricted by any recognized filter keys.
    ///
    /// Text filter values are escaped before binding so they compare equal
    /// to the stored (escaped) form.
    pub async fn list(&self, query: &UserListQuery) -> Result<Vec<UserResponseDto>> {
        let id = match query.id.as_deref() {
            Some(raw) => Some(parse_id(raw).ok_or_else(|| {
                AppError::Validation("invalid id parameter".to_string())
            })?),
            None => None,
        };
        let first_name = query.first_name.as_deref().map(escape);
        let last_name = query.last_name.as_deref().map(escape);
        let email = query.email.as_deref().map(escape);
        let role = query.role.as_deref().map(escape);

        let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", COLUMNS, TABLE));
        let mut filters = Vec::new();
        if let Some(id) = id {
            filters.push(Filter::Int("id", id));
        }
        if let Some(value) = first_name.as_deref() {
            filters.push(Filter::Text("first_name", value));
        }
        if let Some(value) = last_name.as_deref() {
            filters.push(Filter::Text("last_name", value));
        }
        if let Some(value) = email.as_deref() {
            filters.push(Filter::Text("email", value));
        }
        if let Some(value) = role.as_deref() {
            filters.push(Filter::Text("role", value));
        }
        push_filters(&mut builder, filters);

        let users = builder
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Get a user by id; a missing row is an empty result, not an error
    pub async fn get(&self, id: i32) -> Result<Option<UserResponseDto>> {
        let user = self.repo.get(id).await?;
        Ok(user.map(Into::into))
    }

    /// Insert and return the created row in one statement.
    ///
    /// Duplicate emails are refused by the unique constraint on the table;
    /// the conflict surfaces to the caller as a validation error.
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO app_users (first_name, last_name, email, password, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, first_name, last_name, email, password, role",
        )
        .bind(escape(&dto.first_name))
        .bind(escape(&dto.last_name))
        .bind(escape(&dto.email))
        .bind(escape(&dto.password))
        .bind(escape(&dto.role))
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)?;

        Ok(user.into())
    }

    /// Update and return the new row; None when the id matched nothing
    pub async fn update(&self, dto: UpdateUserDto) -> Result<Option<UserResponseDto>> {
        let id = parse_id(&dto.id)
            .ok_or_else(|| AppError::Validation("invalid id; ".to_string()))?;

        let user = sqlx::query_as::<_, User>(
            "UPDATE app_users SET first_name = $1, last_name = $2, email = $3, \
             password = $4, role = $5 \
             WHERE id = $6 \
             RETURNING id, first_name, last_name, email, password, role",
        )
        .bind(escape(&dto.first_name))
        .bind(escape(&dto.last_name))
        .bind(escape(&dto.email))
        .bind(escape(&dto.password))
        .bind(escape(&dto.role))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_email)?;

        Ok(user.map(Into::into))
    }

    /// Delete by id; deleting an absent id still succeeds
    pub async fn delete(&self, id: i32) -> Result<()> {
        self.repo.delete(id).await?;
        Ok(())
    }
}

fn map_unique_email(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Validation("user already exists; ".to_string())
        }
        e => {
            tracing::error!("User statement failed: {:?}", e);
            AppError::Database(e)
        }
    }
}
