use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::FCMError;

/// Google OAuth2 token endpoint used when a key omits `token_uri`
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth2 scope required by the FCM HTTP v1 API
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// FCM Send Result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FCMSendResult {
    /// Opaque message name, e.g. `projects/my-app/messages/0:1500415314455276`
    pub message_id: String,
}

/// Firebase Service Account Key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a key from the JSON document downloaded from the Firebase console
    pub fn from_json(raw: &str) -> Result<Self, FCMError> {
        let key: ServiceAccountKey = serde_json::from_str(raw)
            .map_err(|e| FCMError::CredentialsMalformed(e.to_string()))?;

        if key.project_id.trim().is_empty() {
            return Err(FCMError::CredentialsMalformed(
                "project_id is empty".to_string(),
            ));
        }
        if key.client_email.trim().is_empty() {
            return Err(FCMError::CredentialsMalformed(
                "client_email is empty".to_string(),
            ));
        }

        Ok(key)
    }

    /// Read and parse a key file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FCMError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| FCMError::CredentialsUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&raw)
    }
}

/// Where a message is delivered. Exactly one target per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTarget {
    /// A single device registration token
    Token(String),
    /// A broadcast topic name (without the `/topics/` prefix)
    Topic(String),
}

impl DeliveryTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryTarget::Token(_) => "token",
            DeliveryTarget::Topic(_) => "topic",
        }
    }
}

/// Visible notification block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

/// A fully normalized message, serialized as the `message` object of a v1 send request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    #[serde(flatten)]
    pub target: DeliveryTarget,
    pub notification: PushNotification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

/// Topic names accepted by FCM: `[a-zA-Z0-9-_.~%]+`
pub fn is_valid_topic_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '%'))
}

/// OAuth2 Token Cache
#[derive(Debug, Clone)]
pub(crate) struct TokenCache {
    pub access_token: String,
    pub expires_at: i64,
}

/// JWT Claims for Google OAuth2
#[derive(Debug, Serialize)]
pub(crate) struct JwtClaims {
    pub iss: String,
    pub sub: String,
    pub scope: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Google OAuth2 Token Response
#[derive(Debug, Deserialize)]
pub(crate) struct GoogleTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// FCM Message Request
#[derive(Debug, Serialize)]
pub(crate) struct FcmMessage<'a> {
    pub message: &'a PushMessage,
}

/// FCM API Response
#[derive(Debug, Deserialize)]
pub(crate) struct FcmApiResponse {
    pub name: String,
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
pub(crate) struct FcmErrorEnvelope {
    pub error: FcmErrorResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FcmErrorResponse {
    pub message: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(target: DeliveryTarget) -> PushMessage {
        PushMessage {
            target,
            notification: PushNotification {
                title: "Hi".to_string(),
                body: "There".to_string(),
            },
            data: None,
        }
    }

    #[test]
    fn token_target_serializes_without_topic() {
        let value = serde_json::to_value(message(DeliveryTarget::Token("abc".into()))).unwrap();
        assert_eq!(
            value,
            json!({"token": "abc", "notification": {"title": "Hi", "body": "There"}})
        );
    }

    #[test]
    fn topic_target_serializes_without_token() {
        let mut msg = message(DeliveryTarget::Topic("tribe_42".into()));
        msg.data = Some(BTreeMap::from([("tribeId".to_string(), "42".to_string())]));

        let value = serde_json::to_value(msg).unwrap();
        assert_eq!(value["topic"], "tribe_42");
        assert!(value.get("token").is_none());
        assert_eq!(value["data"]["tribeId"], "42");
    }

    #[test]
    fn topic_name_charset() {
        assert!(is_valid_topic_name("tribe_42"));
        assert!(is_valid_topic_name("news-2024.v1~%20"));
        assert!(!is_valid_topic_name(""));
        assert!(!is_valid_topic_name("tribe 42"));
        assert!(!is_valid_topic_name("tribe/42"));
    }

    #[test]
    fn service_account_key_defaults_token_uri() {
        let key = ServiceAccountKey::from_json(
            r#"{"project_id":"demo","private_key":"pem","client_email":"svc@demo.iam.gserviceaccount.com"}"#,
        )
        .unwrap();
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
        assert!(key.private_key_id.is_empty());
    }

    #[test]
    fn service_account_key_rejects_missing_fields() {
        let err = ServiceAccountKey::from_json(r#"{"project_id":"demo"}"#).unwrap_err();
        assert!(matches!(err, FCMError::CredentialsMalformed(_)));

        let err = ServiceAccountKey::from_json(
            r#"{"project_id":" ","private_key":"pem","client_email":"svc@demo"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FCMError::CredentialsMalformed(_)));
    }

    #[test]
    fn missing_key_file_is_unavailable() {
        let err = ServiceAccountKey::from_file("/nonexistent/serviceAccountKey.json").unwrap_err();
        assert!(matches!(err, FCMError::CredentialsUnavailable { .. }));
    }
}
