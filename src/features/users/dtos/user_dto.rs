use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::users::models::User;
use crate::shared::validation::{self, FieldErrors};

/// Request DTO for creating a user
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl CreateUserDto {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validation::require_text(&mut errors, "firstName", &self.first_name);
        validation::require_text(&mut errors, "lastName", &self.last_name);
        validation::require_email(&mut errors, "email", &self.email);
        validation::require_text(&mut errors, "password", &self.password);
        errors
    }
}

/// Request DTO for updating a user; id travels in the body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[serde(default, deserialize_with = "validation::de_lenient_string")]
    #[schema(value_type = i32)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl UpdateUserDto {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validation::require_id(&mut errors, "id", &self.id);
        validation::require_text(&mut errors, "firstName", &self.first_name);
        validation::require_text(&mut errors, "lastName", &self.last_name);
        validation::require_email(&mut errors, "email", &self.email);
        validation::require_text(&mut errors, "password", &self.password);
        errors
    }
}

/// Recognized filter keys for the user list. The typed struct is the
/// allow-list: unknown query keys are dropped at deserialization and never
/// reach the statement.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Response DTO for a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            password: u.password,
            role: u.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    fn valid_create_dto() -> CreateUserDto {
        CreateUserDto {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            email: SafeEmail().fake(),
            password: "secret".to_string(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn create_with_generated_fields_passes() {
        assert!(valid_create_dto().validate().is_empty());
    }

    #[test]
    fn create_collects_every_missing_field() {
        let dto: CreateUserDto = serde_json::from_str("{}").unwrap();
        let errors = dto.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["firstName", "lastName", "email", "password"]);
        assert_eq!(
            errors.to_message(),
            "invalid firstName; invalid lastName; invalid email; invalid password; "
        );
    }

    #[test]
    fn create_rejects_structurally_bad_email() {
        let mut dto = valid_create_dto();
        dto.email = "not-an-email".to_string();
        let errors = dto.validate();
        assert_eq!(errors.to_message(), "invalid email; ");
    }

    #[test]
    fn empty_role_is_allowed() {
        let mut dto = valid_create_dto();
        dto.role = String::new();
        assert!(dto.validate().is_empty());
    }

    #[test]
    fn update_requires_digits_only_id() {
        let errors_for = |id: &str| {
            let dto = UpdateUserDto {
                id: id.to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "secret".to_string(),
                role: String::new(),
            };
            dto.validate().to_message()
        };
        assert_eq!(errors_for("12"), "");
        assert_eq!(errors_for("12a"), "invalid id; ");
        assert_eq!(errors_for("-12"), "invalid id; ");
    }

    #[test]
    fn list_query_ignores_unknown_keys() {
        let query: UserListQuery =
            serde_json::from_str(r#"{"role": "admin", "password": "x"}"#).unwrap();
        assert_eq!(query.role.as_deref(), Some("admin"));
        assert!(query.id.is_none());
    }
}
