//! HTTP API handlers for peopledir-svc

pub mod error;
pub mod health;
pub mod users;

pub use error::ApiFailure;
pub use health::health_routes;
pub use users::{create_user, delete_user, edit_user, get_user, list_users};
