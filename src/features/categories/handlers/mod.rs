pub mod category_handler;

pub use category_handler::{
    create_category, delete_category, get_category, list_categories, update_category,
};
