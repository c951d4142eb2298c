use actix_web::{web, HttpResponse};

use crate::handlers::AppState;
use crate::models::{DebugConfigResponse, HealthResponse};

/// GET /health
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        message: "Auth server is running".to_string(),
        privy_configured: state.privy_configured(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        environment: state.environment.as_str().to_string(),
    })
}

/// GET /debug/config (not registered in production)
pub async fn debug_config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(DebugConfigResponse {
        environment: state.environment.as_str().to_string(),
        port: state.port,
        privy_app_id_configured: state.privy_app_id_configured,
        privy_app_secret_configured: state.privy_app_secret_configured,
        privy_api_url: state.privy_api_url.clone(),
        wallet_chain_type: state.onboarding.wallet_chain_type().to_string(),
    })
}
