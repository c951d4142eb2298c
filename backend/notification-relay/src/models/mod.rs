use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /send-notification`
///
/// `topicId` and `data.tribeId` may be strings or numbers; both are
/// namespaced into a topic name. `topic` is a full topic name used as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub topic_id: Option<Value>,
}

/// Response wrapper for `POST /send-notification`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotificationResponse {
    pub fn ok(response: Value) -> Self {
        Self {
            success: true,
            response: Some(response),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error),
        }
    }
}
