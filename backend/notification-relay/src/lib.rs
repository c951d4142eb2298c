pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{NotificationError, Result};
pub use handlers::register_routes;
pub use services::NotificationDispatcher;
