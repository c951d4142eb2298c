use async_trait::async_trait;

use crate::client::FCMClient;
use crate::errors::FCMError;
use crate::models::PushMessage;

/// Push delivery provider
///
/// The relay only needs "deliver this message once and tell me what the
/// provider said". The returned value is opaque and echoed to callers as-is.
#[async_trait]
pub trait PushProvider: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<serde_json::Value, FCMError>;
}

#[async_trait]
impl PushProvider for FCMClient {
    async fn send(&self, message: &PushMessage) -> Result<serde_json::Value, FCMError> {
        let result = FCMClient::send(self, message).await?;
        Ok(serde_json::Value::String(result.message_id))
    }
}
