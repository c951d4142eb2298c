//! Notification dispatch
//!
//! Turns a `NotificationRequest` into exactly one `PushMessage` and hands it
//! to the push provider once. No retries: provider failures go straight back
//! to the caller.
//!
//! Target precedence (first match wins):
//! 1. `topic`, used verbatim
//! 2. `topicId`, namespaced with the topic prefix
//! 3. `data.tribeId`, namespaced with the topic prefix
//! 4. `token`
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};
use tribes_fcm_shared::{
    is_valid_topic_name, DeliveryTarget, PushMessage, PushNotification, PushProvider,
};

use crate::error::{NotificationError, Result};
use crate::models::NotificationRequest;

pub const DEFAULT_TOPIC_PREFIX: &str = "tribe_";

/// Key in `data` that names the tribe a message is broadcast to
pub const TRIBE_ID_KEY: &str = "tribeId";

pub struct NotificationDispatcher {
    provider: Arc<dyn PushProvider>,
    topic_prefix: String,
}

impl NotificationDispatcher {
    pub fn new(provider: Arc<dyn PushProvider>, topic_prefix: impl Into<String>) -> Self {
        Self {
            provider,
            topic_prefix: topic_prefix.into(),
        }
    }

    /// Validate and normalize a request without sending it
    pub fn normalize(&self, req: NotificationRequest) -> Result<PushMessage> {
        let target = resolve_target(&req, &self.topic_prefix)?;

        Ok(PushMessage {
            target,
            notification: PushNotification {
                title: req.title,
                body: req.body,
            },
            data: normalize_data(req.data),
        })
    }

    /// Send a request and return the provider's response untouched
    pub async fn dispatch(&self, req: NotificationRequest) -> Result<Value> {
        let message = self.normalize(req)?;
        let target_kind = message.target.kind();
        let topic = match &message.target {
            DeliveryTarget::Topic(name) => Some(name.as_str()),
            DeliveryTarget::Token(_) => None,
        };

        match self.provider.send(&message).await {
            Ok(response) => {
                info!(target_kind, topic, "Notification delivered to provider");
                Ok(response)
            }
            Err(e) => {
                error!(target_kind, topic, error = %e, "Error sending notification");
                Err(NotificationError::Provider(e))
            }
        }
    }
}

/// Pick the single delivery target for a request
pub fn resolve_target(req: &NotificationRequest, topic_prefix: &str) -> Result<DeliveryTarget> {
    if let Some(topic) = &req.topic {
        let name = topic.trim();
        let name = name.strip_prefix("/topics/").unwrap_or(name);
        return validated_topic(name.to_string(), "topic");
    }

    if let Some(topic_id) = &req.topic_id {
        let id = identifier(topic_id, "topicId")?;
        return validated_topic(format!("{}{}", topic_prefix, id), "topicId");
    }

    if let Some(tribe_id) = req.data.as_ref().and_then(|d| d.get(TRIBE_ID_KEY)) {
        if !tribe_id.is_null() {
            let id = identifier(tribe_id, TRIBE_ID_KEY)?;
            return validated_topic(format!("{}{}", topic_prefix, id), TRIBE_ID_KEY);
        }
    }

    match req.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(DeliveryTarget::Token(token.to_string())),
        _ => Err(NotificationError::Validation(
            "A device token or a topic identifier (topic, topicId or data.tribeId) is required"
                .to_string(),
        )),
    }
}

fn identifier(value: &Value, field: &str) -> Result<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            return Err(NotificationError::Validation(format!(
                "{} must be a string or a number",
                field
            )))
        }
    };

    if id.is_empty() {
        return Err(NotificationError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }

    Ok(id)
}

fn validated_topic(name: String, field: &str) -> Result<DeliveryTarget> {
    if name.is_empty() {
        return Err(NotificationError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    if !is_valid_topic_name(&name) {
        return Err(NotificationError::Validation(format!(
            "{} produces an invalid topic name: {}",
            field, name
        )));
    }
    Ok(DeliveryTarget::Topic(name))
}

/// FCM data payloads are string-to-string; stringify scalars, drop nulls,
/// and serialize nested values as JSON text.
pub fn normalize_data(data: Option<Map<String, Value>>) -> Option<BTreeMap<String, String>> {
    let normalized: BTreeMap<String, String> = data?
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
            };
            Some((key, value))
        })
        .collect();

    (!normalized.is_empty()).then_some(normalized)
}
