use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::PrivyError;
use crate::models::*;

/// Production Privy API
pub const DEFAULT_PRIVY_API_URL: &str = "https://auth.privy.io";

/// Privy REST client
///
/// Every request carries the `privy-app-id` header and HTTP Basic auth with
/// the app id and secret. Construct once at startup and share behind an `Arc`.
#[derive(Clone)]
pub struct PrivyClient {
    credentials: PrivyCredentials,
    api_url: String,
    http: Client,
}

impl PrivyClient {
    pub fn new(credentials: PrivyCredentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_PRIVY_API_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn app_id(&self) -> &str {
        &self.credentials.app_id
    }

    /// Email a one-time login code
    ///
    /// POST /api/v1/passwordless/init
    pub async fn send_login_code(&self, email: &str) -> Result<(), PrivyError> {
        let response = self
            .request(Method::POST, "/api/v1/passwordless/init")
            .json(&PasswordlessInitRequest { email })
            .send()
            .await
            .map_err(|e| PrivyError::Request(e.to_string()))?;

        ensure_success(response).await?;
        debug!(email = %email, "Privy accepted login code request");
        Ok(())
    }

    /// Check a login code. Privy enforces code expiry and reuse rules.
    ///
    /// POST /api/v1/passwordless/authenticate
    pub async fn verify_login_code(&self, email: &str, code: &str) -> Result<(), PrivyError> {
        let response = self
            .request(Method::POST, "/api/v1/passwordless/authenticate")
            .json(&PasswordlessAuthenticateRequest { email, code })
            .send()
            .await
            .map_err(|e| PrivyError::Request(e.to_string()))?;

        ensure_success(response).await?;
        Ok(())
    }

    /// Find a user by email
    ///
    /// `Ok(None)` only for a 404; every other failure is an error so callers
    /// can tell "does not exist" apart from "could not check".
    ///
    /// POST /api/v1/users/email/address
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<PrivyUser>, PrivyError> {
        let response = self
            .request(Method::POST, "/api/v1/users/email/address")
            .json(&EmailLookupRequest { address: email })
            .send()
            .await
            .map_err(|e| PrivyError::Request(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(email = %email, "No Privy user for email");
            return Ok(None);
        }

        read_json(response).await.map(Some)
    }

    /// Import a user with a pre-linked email account
    ///
    /// POST /api/v1/users
    pub async fn create_user(&self, email: &str) -> Result<PrivyUser, PrivyError> {
        let request = CreateUserRequest {
            linked_accounts: vec![NewLinkedAccount {
                account_type: "email",
                address: email,
            }],
        };

        let response = self
            .request(Method::POST, "/api/v1/users")
            .json(&request)
            .send()
            .await
            .map_err(|e| PrivyError::Request(e.to_string()))?;

        read_json(response).await
    }

    /// Create a server-side wallet on `chain_type` and link it to the user.
    /// Returns the updated user.
    ///
    /// POST /api/v1/users/{user_id}/wallets
    pub async fn create_wallet(
        &self,
        user_id: &str,
        chain_type: &str,
    ) -> Result<PrivyUser, PrivyError> {
        let path = format!("/api/v1/users/{}/wallets", urlencoding::encode(user_id));
        let request = CreateWalletsRequest {
            wallets: vec![WalletSpec { chain_type }],
        };

        let response = self
            .request(Method::POST, &path)
            .json(&request)
            .send()
            .await
            .map_err(|e| PrivyError::Request(e.to_string()))?;

        read_json(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.api_url, path))
            .header("privy-app-id", &self.credentials.app_id)
            .basic_auth(&self.credentials.app_id, Some(&self.credentials.app_secret))
    }
}

async fn ensure_success(response: Response) -> Result<Response, PrivyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = %status, body = %body, "Privy API returned an error");

    Err(PrivyError::Api {
        status: status.as_u16(),
        message: api_error_message(status, &body),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PrivyError> {
    ensure_success(response)
        .await?
        .json()
        .await
        .map_err(|e| PrivyError::ResponseParse(e.to_string()))
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<PrivyErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| format!("Privy API error: {}", status))
}
