use async_trait::async_trait;

use crate::client::PrivyClient;
use crate::errors::PrivyError;
use crate::models::PrivyUser;

/// Identity platform operations used by the auth relay
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn send_login_code(&self, email: &str) -> Result<(), PrivyError>;

    /// Code expiry and reuse rules are the platform's
    async fn verify_login_code(&self, email: &str, code: &str) -> Result<(), PrivyError>;

    /// `Ok(None)` means the user does not exist; `Err` means the lookup itself failed
    async fn find_user_by_email(&self, email: &str) -> Result<Option<PrivyUser>, PrivyError>;

    async fn create_user(&self, email: &str) -> Result<PrivyUser, PrivyError>;

    async fn create_wallet(&self, user_id: &str, chain_type: &str)
        -> Result<PrivyUser, PrivyError>;
}

#[async_trait]
impl IdentityProvider for PrivyClient {
    async fn send_login_code(&self, email: &str) -> Result<(), PrivyError> {
        PrivyClient::send_login_code(self, email).await
    }

    async fn verify_login_code(&self, email: &str, code: &str) -> Result<(), PrivyError> {
        PrivyClient::verify_login_code(self, email, code).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<PrivyUser>, PrivyError> {
        PrivyClient::find_user_by_email(self, email).await
    }

    async fn create_user(&self, email: &str) -> Result<PrivyUser, PrivyError> {
        PrivyClient::create_user(self, email).await
    }

    async fn create_wallet(
        &self,
        user_id: &str,
        chain_type: &str,
    ) -> Result<PrivyUser, PrivyError> {
        PrivyClient::create_wallet(self, user_id, chain_type).await
    }
}
