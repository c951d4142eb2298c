use actix_web::{web, HttpResponse};

use crate::error::{AuthRelayError, Result};
use crate::handlers::AppState;
use crate::models::{
    CreateUserResponse, EmailRequest, SendLoginCodeResponse, VerifyCodeRequest,
    VerifyCodeResponse,
};
use crate::services::{normalize_email, CreateUserOutcome};

fn required_email(raw: Option<&str>) -> Result<String> {
    normalize_email(raw).ok_or_else(|| AuthRelayError::Validation("Email is required".to_string()))
}

/// Email a one-time login code
///
/// POST /send-login-code
pub async fn send_login_code(
    state: web::Data<AppState>,
    req: web::Json<EmailRequest>,
) -> Result<HttpResponse> {
    let email = required_email(req.email.as_deref())?;

    state
        .onboarding
        .send_login_code(&email)
        .await
        .map_err(|e| e.redact(state.environment))?;

    Ok(HttpResponse::Ok().json(SendLoginCodeResponse {
        message: "Login code sent".to_string(),
        email,
    }))
}

/// Verify a login code and make sure the user has a wallet
///
/// POST /verify-code
pub async fn verify_code(
    state: web::Data<AppState>,
    req: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse> {
    let email = normalize_email(req.email.as_deref());
    let code = req
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let (email, code) = match (email, code) {
        (Some(email), Some(code)) => (email, code),
        _ => {
            return Err(AuthRelayError::Validation(
                "Email and code are required".to_string(),
            ))
        }
    };

    let login = state
        .onboarding
        .verify_and_provision(&email, code)
        .await
        .map_err(|e| e.redact(state.environment))?;

    tracing::info!(
        user_id = %login.user.id,
        wallet_created = login.wallet_created,
        "Login verified"
    );

    Ok(HttpResponse::Ok().json(VerifyCodeResponse {
        message: "Login successful".to_string(),
        user_id: login.user.id.clone(),
        user: login.user,
        wallet: login.wallet,
    }))
}

/// Create a user for an email unless one exists
///
/// POST /create-user
pub async fn create_user(
    state: web::Data<AppState>,
    req: web::Json<EmailRequest>,
) -> Result<HttpResponse> {
    let email = required_email(req.email.as_deref())?;

    let outcome = state
        .onboarding
        .create_user(&email)
        .await
        .map_err(|e| e.redact(state.environment))?;

    let (message, user) = match outcome {
        CreateUserOutcome::Existing(user) => ("User already exists", user),
        CreateUserOutcome::Created(user) => ("User created successfully", user),
    };

    Ok(HttpResponse::Ok().json(CreateUserResponse {
        message: message.to_string(),
        user,
    }))
}
