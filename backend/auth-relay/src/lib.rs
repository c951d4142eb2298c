pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AuthRelayError, Result};
pub use handlers::{register_routes, AppState};
pub use services::OnboardingService;
