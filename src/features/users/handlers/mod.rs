pub mod user_handler;

pub use user_handler::{create_user, delete_user, get_user, list_users, update_user};
