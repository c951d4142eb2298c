use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tribes_fcm_shared::FCMError;

use crate::models::NotificationResponse;

pub type Result<T> = std::result::Result<T, NotificationError>;

#[derive(Debug, Error)]
pub enum NotificationError {
    /// The request cannot be turned into a deliverable message
    #[error("{0}")]
    Validation(String),

    /// FCM rejected the message or could not be reached
    #[error("{0}")]
    Provider(#[from] FCMError),
}

impl ResponseError for NotificationError {
    fn status_code(&self) -> StatusCode {
        match self {
            NotificationError::Validation(_) => StatusCode::BAD_REQUEST,
            NotificationError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(NotificationResponse::err(self.to_string()))
    }
}
