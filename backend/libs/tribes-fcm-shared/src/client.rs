use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::FCMError;
use crate::models::*;

/// Production FCM endpoint
pub const DEFAULT_FCM_API_URL: &str = "https://fcm.googleapis.com";

/// Seconds before expiry at which a cached access token is refreshed
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Upper bound for one token exchange or send, so a hung endpoint cannot
/// hold the token cache lock indefinitely
pub const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Firebase Cloud Messaging Client
///
/// Handles OAuth2 token generation, caching, and message delivery over the
/// FCM HTTP v1 API. Construct once at startup and share behind an `Arc`.
pub struct FCMClient {
    project_id: String,
    credentials: Arc<ServiceAccountKey>,
    encoding_key: EncodingKey,
    api_url: String,
    token_cache: Mutex<Option<TokenCache>>,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for FCMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FCMClient")
            .field("project_id", &self.project_id)
            .field("client_email", &self.credentials.client_email)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl FCMClient {
    /// Create new FCM client
    ///
    /// The private key is parsed here so that a broken key fails at startup
    /// instead of on the first send.
    pub fn new(credentials: ServiceAccountKey) -> Result<Self, FCMError> {
        let encoding_key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|e| FCMError::KeyParseError(e.to_string()))?;

        Ok(Self {
            project_id: credentials.project_id.clone(),
            credentials: Arc::new(credentials),
            encoding_key,
            api_url: DEFAULT_FCM_API_URL.to_string(),
            token_cache: Mutex::new(None),
            http_client: http_client(DEFAULT_REQUEST_TIMEOUT)?,
        })
    }

    pub fn with_request_timeout(mut self, timeout: StdDuration) -> Result<Self, FCMError> {
        self.http_client = http_client(timeout)?;
        Ok(self)
    }

    /// Send to a different project than the one named in the key
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Point the client at another FCM-compatible endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Send one message to its token or topic target
    pub async fn send(&self, message: &PushMessage) -> Result<FCMSendResult, FCMError> {
        let access_token = self.get_access_token().await?;

        let url = format!(
            "{}/v1/projects/{}/messages:send",
            self.api_url, self.project_id
        );

        debug!(
            target_kind = message.target.kind(),
            project_id = %self.project_id,
            "Sending FCM message"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&access_token)
            .json(&FcmMessage { message })
            .send()
            .await
            .map_err(|e| FCMError::SendRequestError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let fcm_response: FcmApiResponse = response
                .json()
                .await
                .map_err(|e| FCMError::ResponseParseError(e.to_string()))?;

            return Ok(FCMSendResult {
                message_id: fcm_response.name,
            });
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        warn!(status = %status, body = %error_text, "FCM API rejected message");

        Err(FCMError::ApiError(
            status.as_u16(),
            api_error_message(status, &error_text),
        ))
    }

    /// Get access token from service account (with caching)
    ///
    /// The cache lock is held across the refresh so concurrent callers wait
    /// for one exchange rather than each minting their own token.
    pub async fn get_access_token(&self) -> Result<String, FCMError> {
        let mut cache = self.token_cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.expires_at > Utc::now().timestamp() + TOKEN_REFRESH_MARGIN_SECS {
                return Ok(cached.access_token.clone());
            }
        }

        let now = Utc::now();
        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            sub: self.credentials.client_email.clone(),
            scope: FCM_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };

        let mut header = Header::new(Algorithm::RS256);
        if !self.credentials.private_key_id.is_empty() {
            header.kid = Some(self.credentials.private_key_id.clone());
        }

        let assertion = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| FCMError::JwtEncodeError(e.to_string()))?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| FCMError::TokenError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FCMError::TokenRequestFailed(status.as_u16(), body));
        }

        let token_response: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| FCMError::TokenParseError(e.to_string()))?;

        *cache = Some(TokenCache {
            access_token: token_response.access_token.clone(),
            expires_at: Utc::now().timestamp() + token_response.expires_in,
        });

        debug!(
            expires_in = token_response.expires_in,
            "Refreshed FCM access token"
        );

        Ok(token_response.access_token)
    }
}

fn http_client(timeout: StdDuration) -> Result<reqwest::Client, FCMError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| FCMError::HttpClientError(e.to_string()))
}

/// Prefer the human-readable message from a Google error envelope
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<FcmErrorEnvelope>(body) {
        Ok(envelope) => match (envelope.error.message, envelope.error.status) {
            (Some(message), _) => message,
            (None, Some(code)) => format!("FCM API error: {}", code),
            (None, None) => format!("FCM API error: {}", status),
        },
        Err(_) => format!("FCM API error: {} - {}", status, body),
    }
}
