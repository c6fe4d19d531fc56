use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database row for a product
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub product_name: String,
    pub description: Option<String>,
    pub stock: i32,
    pub price: Decimal,
}
