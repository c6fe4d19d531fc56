use utoipa::{Modify, OpenApi};

use crate::core::error::ErrorBody;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::category_handler::list_categories,
        categories_handlers::category_handler::get_category,
        categories_handlers::category_handler::create_category,
        categories_handlers::category_handler::update_category,
        categories_handlers::category_handler::delete_category,
        // Products
        products_handlers::product_handler::list_products,
        products_handlers::product_handler::get_product,
        products_handlers::product_handler::create_product,
        products_handlers::product_handler::update_product,
        products_handlers::product_handler::delete_product,
        // Users
        users_handlers::user_handler::list_users,
        users_handlers::user_handler::get_user,
        users_handlers::user_handler::create_user,
        users_handlers::user_handler::update_user,
        users_handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            // Shared
            ErrorBody,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            // Products
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::ProductResponseDto,
            // Users
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
        )
    ),
    tags(
        (name = "categories", description = "Category CRUD"),
        (name = "products", description = "Product CRUD"),
        (name = "users", description = "User CRUD with list filters"),
    ),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "CRUD API for categories, products and users",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
