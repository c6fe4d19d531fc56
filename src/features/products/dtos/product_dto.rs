use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::products::models::Product;
use crate::shared::validation::{self, FieldErrors};

/// Request DTO for creating a product
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[serde(default, deserialize_with = "validation::de_lenient_string")]
    #[schema(value_type = i32)]
    pub category_id: String,
    #[serde(default)]
    pub product_name: String,
    pub description: Option<String>,
    pub stock: Option<i32>,
    pub price: Option<Decimal>,
}

impl CreateProductDto {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validation::require_id(&mut errors, "categoryId", &self.category_id);
        validation::require_text(&mut errors, "productName", &self.product_name);
        if !matches!(self.stock, Some(stock) if stock >= 0) {
            errors.push("stock", "invalid stock");
        }
        if !matches!(self.price, Some(price) if price >= Decimal::ZERO) {
            errors.push("price", "invalid price");
        }
        errors
    }
}

/// Request DTO for updating a product; id travels in the body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    #[serde(default, deserialize_with = "validation::de_lenient_string")]
    #[schema(value_type = i32)]
    pub id: String,
    #[serde(default, deserialize_with = "validation::de_lenient_string")]
    #[schema(value_type = i32)]
    pub category_id: String,
    #[serde(default)]
    pub product_name: String,
    pub description: Option<String>,
    pub stock: Option<i32>,
    pub price: Option<Decimal>,
}

impl UpdateProductDto {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validation::require_id(&mut errors, "id", &self.id);
        validation::require_id(&mut errors, "categoryId", &self.category_id);
        validation::require_text(&mut errors, "productName", &self.product_name);
        if !matches!(self.stock, Some(stock) if stock >= 0) {
            errors.push("stock", "invalid stock");
        }
        if !matches!(self.price, Some(price) if price >= Decimal::ZERO) {
            errors.push("price", "invalid price");
        }
        errors
    }
}

/// Response DTO for a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: i32,
    pub category_id: i32,
    pub product_name: String,
    pub description: Option<String>,
    pub stock: i32,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            product_name: p.product_name,
            description: p.description,
            stock: p.stock,
            price: p.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_with_valid_fields_passes() {
        let dto: CreateProductDto = serde_json::from_str(
            r#"{"categoryId": 1, "productName": "Kettle", "stock": 5, "price": 19.99}"#,
        )
        .unwrap();
        assert!(dto.validate().is_empty());
    }

    #[test]
    fn create_collects_every_failing_field() {
        let dto: CreateProductDto = serde_json::from_str(
            r#"{"categoryId": "x", "productName": "", "stock": -1, "price": -0.5}"#,
        )
        .unwrap();
        let errors = dto.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["categoryId", "productName", "stock", "price"]);
        assert_eq!(
            errors.to_message(),
            "invalid categoryId; invalid productName; invalid stock; invalid price; "
        );
    }

    #[test]
    fn create_with_missing_stock_and_price_names_both() {
        let dto: CreateProductDto =
            serde_json::from_str(r#"{"categoryId": 1, "productName": "Kettle"}"#).unwrap();
        let errors = dto.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["stock", "price"]);
    }

    #[test]
    fn zero_stock_and_zero_price_are_allowed() {
        let dto: CreateProductDto = serde_json::from_str(
            r#"{"categoryId": 1, "productName": "Sample", "stock": 0, "price": 0}"#,
        )
        .unwrap();
        assert!(dto.validate().is_empty());
    }

    #[test]
    fn update_requires_digits_only_id() {
        let dto: UpdateProductDto = serde_json::from_str(
            r#"{"id": -4, "categoryId": 1, "productName": "Kettle", "stock": 5, "price": 1}"#,
        )
        .unwrap();
        let errors = dto.validate();
        assert_eq!(errors.to_message(), "invalid id; ");
    }

    #[test]
    fn price_round_trips_as_decimal() {
        let dto: CreateProductDto = serde_json::from_str(
            r#"{"categoryId": 1, "productName": "Kettle", "stock": 5, "price": "19.99"}"#,
        )
        .unwrap();
        assert_eq!(dto.price, Some(Decimal::new(1999, 2)));
    }
}
