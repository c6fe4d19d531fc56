use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::Category;
use crate::shared::validation::{self, FieldErrors};

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[serde(default)]
    pub category_name: String,
    pub description: Option<String>,
}

impl CreateCategoryDto {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validation::require_text(&mut errors, "categoryName", &self.category_name);
        errors
    }
}

/// Request DTO for updating a category; id travels in the body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[serde(default, deserialize_with = "validation::de_lenient_string")]
    #[schema(value_type = i32)]
    pub id: String,
    #[serde(default)]
    pub category_name: String,
    pub description: Option<String>,
}

impl UpdateCategoryDto {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validation::require_id(&mut errors, "id", &self.id);
        validation::require_text(&mut errors, "categoryName", &self.category_name);
        errors
    }
}

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: i32,
    pub category_name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            category_name: c.category_name,
            description: c.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_empty_category_name() {
        let dto: CreateCategoryDto = serde_json::from_str(r#"{"categoryName": ""}"#).unwrap();
        let errors = dto.validate();
        assert_eq!(errors.to_message(), "invalid categoryName; ");
    }

    #[test]
    fn create_accepts_name_with_optional_description() {
        let dto: CreateCategoryDto =
            serde_json::from_str(r#"{"categoryName": "Books"}"#).unwrap();
        assert!(dto.validate().is_empty());
        assert!(dto.description.is_none());
    }

    #[test]
    fn update_checks_id_before_name() {
        let dto: UpdateCategoryDto =
            serde_json::from_str(r#"{"id": "12a", "categoryName": ""}"#).unwrap();
        let errors = dto.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["id", "categoryName"]);
        assert_eq!(errors.to_message(), "invalid id; invalid categoryName; ");
    }

    #[test]
    fn update_accepts_numeric_json_id() {
        let dto: UpdateCategoryDto =
            serde_json::from_str(r#"{"id": 3, "categoryName": "Books"}"#).unwrap();
        assert!(dto.validate().is_empty());
    }
}
