use sqlx::FromRow;

/// Database row for a category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i32,
    pub category_name: String,
    pub description: Option<String>,
}
