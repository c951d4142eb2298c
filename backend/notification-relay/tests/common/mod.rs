use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tribes_fcm_shared::{FCMError, PushMessage, PushProvider};

/// In-process push provider that records every message it is asked to send
pub struct StubPushProvider {
    reply: Reply,
    sent: Mutex<Vec<PushMessage>>,
}

enum Reply {
    Success(Value),
    Failure(u16, String),
}

impl StubPushProvider {
    pub fn succeeding(response: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Success(response),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Failure(status, message.to_string()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushProvider for StubPushProvider {
    async fn send(&self, message: &PushMessage) -> Result<Value, FCMError> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.reply {
            Reply::Success(value) => Ok(value.clone()),
            Reply::Failure(status, message) => Err(FCMError::ApiError(*status, message.clone())),
        }
    }
}
