use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tribes_common::Environment;
use tribes_privy_shared::PrivyError;

pub type Result<T> = std::result::Result<T, AuthRelayError>;

/// Errors returned to auth relay callers.
///
/// Provider failures keep the provider message in `details` until
/// `redact` is applied for the running environment.
#[derive(Debug, Error)]
pub enum AuthRelayError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to send login code")]
    SendCode { details: String },

    #[error("Verification failed")]
    Verification { details: String },

    /// The existence check failed; creating the user now could duplicate it
    #[error("User lookup failed")]
    Lookup { details: String },

    #[error("Failed to create user")]
    CreateUser { status: u16, details: String },
}

impl AuthRelayError {
    pub fn send_code(err: PrivyError) -> Self {
        AuthRelayError::SendCode {
            details: err.to_string(),
        }
    }

    pub fn verification(err: PrivyError) -> Self {
        AuthRelayError::Verification {
            details: err.to_string(),
        }
    }

    pub fn lookup(err: PrivyError) -> Self {
        AuthRelayError::Lookup {
            details: err.to_string(),
        }
    }

    /// Keeps the provider's status when it is a real HTTP error status
    pub fn create_user(err: PrivyError) -> Self {
        let status = err
            .status()
            .filter(|s| (400..=599).contains(s))
            .unwrap_or(500);
        AuthRelayError::CreateUser {
            status,
            details: err.to_string(),
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            AuthRelayError::Validation(_) => None,
            AuthRelayError::SendCode { details }
            | AuthRelayError::Verification { details }
            | AuthRelayError::Lookup { details }
            | AuthRelayError::CreateUser { details, .. } => Some(details),
        }
    }

    /// Replace provider details with a generic phrase in production
    pub fn redact(self, environment: Environment) -> Self {
        if !environment.is_production() {
            return self;
        }
        match self {
            AuthRelayError::Validation(msg) => AuthRelayError::Validation(msg),
            AuthRelayError::SendCode { details } => AuthRelayError::SendCode {
                details: environment.redact(details),
            },
            AuthRelayError::Verification { details } => AuthRelayError::Verification {
                details: environment.redact(details),
            },
            AuthRelayError::Lookup { details } => AuthRelayError::Lookup {
                details: environment.redact(details),
            },
            AuthRelayError::CreateUser { status, details } => AuthRelayError::CreateUser {
                status,
                details: environment.redact(details),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retryable: Option<bool>,
}

impl ResponseError for AuthRelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthRelayError::Validation(_) | AuthRelayError::Verification { .. } => {
                StatusCode::BAD_REQUEST
            }
            AuthRelayError::SendCode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AuthRelayError::Lookup { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AuthRelayError::CreateUser { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let retryable = matches!(self, AuthRelayError::Lookup { .. }).then_some(true);

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details: self.details(),
            retryable,
        })
    }
}
