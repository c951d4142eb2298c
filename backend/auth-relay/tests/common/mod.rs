use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tribes_privy_shared::{IdentityProvider, PrivyError, PrivyUser};

/// In-memory identity provider that records every call it receives
#[derive(Default)]
pub struct StubIdentityProvider {
    users: Mutex<HashMap<String, PrivyUser>>,
    calls: Mutex<Vec<String>>,
    valid_code: Option<String>,
    send_fails: bool,
    lookup_fails: bool,
    create_fails_with: Option<u16>,
}

impl StubIdentityProvider {
    pub fn new() -> Self {
        Self {
            valid_code: Some("123456".to_string()),
            ..Default::default()
        }
    }

    pub fn with_user(self, email: &str, user: PrivyUser) -> Self {
        self.users.lock().unwrap().insert(email.to_string(), user);
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.send_fails = true;
        self
    }

    pub fn failing_lookup(mut self) -> Self {
        self.lookup_fails = true;
        self
    }

    pub fn failing_create(mut self, status: u16) -> Self {
        self.create_fails_with = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn user_with_email(id: &str, email: &str) -> PrivyUser {
    serde_json::from_value(json!({
        "id": id,
        "linked_accounts": [{"type": "email", "address": email}]
    }))
    .unwrap()
}

pub fn user_with_wallet(id: &str, email: &str, address: &str) -> PrivyUser {
    serde_json::from_value(json!({
        "id": id,
        "linked_accounts": [
            {"type": "email", "address": email},
            {"type": "wallet", "address": address, "chain_type": "ethereum"}
        ]
    }))
    .unwrap()
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn send_login_code(&self, email: &str) -> Result<(), PrivyError> {
        self.record(format!("send_login_code:{}", email));
        if self.send_fails {
            return Err(PrivyError::Api {
                status: 429,
                message: "Too many requests".into(),
            });
        }
        Ok(())
    }

    async fn verify_login_code(&self, email: &str, code: &str) -> Result<(), PrivyError> {
        self.record(format!("verify_login_code:{}", email));
        if self.valid_code.as_deref() == Some(code) {
            Ok(())
        } else {
            Err(PrivyError::Api {
                status: 401,
                message: "Invalid code".into(),
            })
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<PrivyUser>, PrivyError> {
        self.record(format!("find_user_by_email:{}", email));
        if self.lookup_fails {
            return Err(PrivyError::Request("connection reset".into()));
        }
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn create_user(&self, email: &str) -> Result<PrivyUser, PrivyError> {
        self.record(format!("create_user:{}", email));
        if let Some(status) = self.create_fails_with {
            return Err(PrivyError::Api {
                status,
                message: "User could not be created".into(),
            });
        }

        let mut users = self.users.lock().unwrap();
        let user = user_with_email(&format!("did:privy:{}", users.len() + 1), email);
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }

    async fn create_wallet(
        &self,
        user_id: &str,
        chain_type: &str,
    ) -> Result<PrivyUser, PrivyError> {
        self.record(format!("create_wallet:{}", user_id));

        let mut users = self.users.lock().unwrap();
        let user = users
            .values_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| PrivyError::Api {
                status: 404,
                message: "User not found".into(),
            })?;

        if let Some(Value::Array(accounts)) = user.extra.get_mut("linked_accounts") {
            accounts.push(json!({
                "type": "wallet",
                "address": "0xfresh",
                "chain_type": chain_type
            }));
        }
        Ok(user.clone())
    }
}
