use thiserror::Error;

/// Privy Client Error Types
#[derive(Error, Debug)]
pub enum PrivyError {
    #[error("Privy request failed: {0}")]
    Request(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Privy response: {0}")]
    ResponseParse(String),

    #[error("Privy returned no {0} wallet for the user")]
    WalletMissing(String),
}

impl PrivyError {
    /// HTTP status reported by Privy, when the failure came from the API itself
    pub fn status(&self) -> Option<u16> {
        match self {
            PrivyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport failures, throttling and 5xx responses may succeed on a later attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            PrivyError::Request(_) => true,
            PrivyError::Api { status, .. } => *status == 429 || *status >= 500,
            PrivyError::ResponseParse(_) | PrivyError::WalletMissing(_) => false,
        }
    }
}
