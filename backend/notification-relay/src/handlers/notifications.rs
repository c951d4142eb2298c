use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

use crate::error::{NotificationError, Result};
use crate::models::{NotificationRequest, NotificationResponse};
use crate::services::NotificationDispatcher;

pub const LIVENESS_MESSAGE: &str = "Tribes notification server running";

/// Send one push notification
///
/// POST /send-notification
pub async fn send_notification(
    dispatcher: web::Data<NotificationDispatcher>,
    req: web::Json<NotificationRequest>,
) -> Result<HttpResponse> {
    let response = dispatcher.dispatch(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(NotificationResponse::ok(response)))
}

/// GET /
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "notification-relay",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Malformed JSON gets the same `{success:false, error}` shape as validation failures
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    NotificationError::Validation(format!("Invalid request body: {}", err)).into()
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(liveness))
        .route("/health", web::get().to(health))
        .route("/send-notification", web::post().to(send_notification));
}
