use thiserror::Error;

/// FCM Client Error Types
#[derive(Error, Debug)]
pub enum FCMError {
    #[error("Failed to read service account key at {path}: {reason}")]
    CredentialsUnavailable { path: String, reason: String },

    #[error("Malformed service account key: {0}")]
    CredentialsMalformed(String),

    #[error("Failed to parse private key: {0}")]
    KeyParseError(String),

    #[error("Failed to encode JWT: {0}")]
    JwtEncodeError(String),

    #[error("Failed to create HTTP client: {0}")]
    HttpClientError(String),

    #[error("Failed to get access token: {0}")]
    TokenError(String),

    #[error("Token request failed with status {0}: {1}")]
    TokenRequestFailed(u16, String),

    #[error("Failed to parse token response: {0}")]
    TokenParseError(String),

    #[error("FCM send request failed: {0}")]
    SendRequestError(String),

    #[error("Failed to parse FCM response: {0}")]
    ResponseParseError(String),

    #[error("{1}")]
    ApiError(u16, String),
}

impl FCMError {
    /// HTTP status reported by FCM, when the failure came from the API itself
    pub fn api_status(&self) -> Option<u16> {
        match self {
            FCMError::ApiError(status, _) => Some(*status),
            _ => None,
        }
    }
}
