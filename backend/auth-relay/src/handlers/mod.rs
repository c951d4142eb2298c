/// HTTP handlers for the auth relay
pub mod auth;
pub mod health;

pub use auth::*;
pub use health::*;

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use tribes_common::Environment;

use crate::error::AuthRelayError;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub onboarding: crate::services::OnboardingService,
    pub environment: Environment,
    pub port: u16,
    pub privy_app_id_configured: bool,
    pub privy_app_secret_configured: bool,
    pub privy_api_url: String,
}

impl AppState {
    pub fn privy_configured(&self) -> bool {
        self.privy_app_id_configured && self.privy_app_secret_configured
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AuthRelayError::Validation(format!("Invalid request body: {}", err)).into()
}

/// Register routes. The debug route only exists outside production.
pub fn register_routes(cfg: &mut web::ServiceConfig, environment: Environment) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health))
        .route("/send-login-code", web::post().to(send_login_code))
        .route("/verify-code", web::post().to(verify_code))
        .route("/create-user", web::post().to(create_user));

    if !environment.is_production() {
        cfg.route("/debug/config", web::get().to(debug_config));
    }
}
