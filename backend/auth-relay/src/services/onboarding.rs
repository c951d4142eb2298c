//! Email login and wallet onboarding
//!
//! Each operation is a short, linear sequence of identity-provider calls.
//! Nothing is stored locally and nothing is rolled back: the wallet step
//! checks the user's linked accounts first, so repeating a verification
//! never links a second wallet.
use std::sync::Arc;
use tracing::{error, info, warn};
use tribes_privy_shared::{IdentityProvider, LinkedAccount, PrivyError, PrivyUser};

use crate::error::{AuthRelayError, Result};

pub const DEFAULT_WALLET_CHAIN_TYPE: &str = "ethereum";

/// A verified login with its wallet guaranteed to exist
#[derive(Debug, Clone)]
pub struct VerifiedLogin {
    pub user: PrivyUser,
    pub wallet: LinkedAccount,
    pub wallet_created: bool,
}

#[derive(Debug, Clone)]
pub enum CreateUserOutcome {
    Existing(PrivyUser),
    Created(PrivyUser),
}

pub struct OnboardingService {
    provider: Arc<dyn IdentityProvider>,
    wallet_chain_type: String,
}

impl OnboardingService {
    pub fn new(provider: Arc<dyn IdentityProvider>, wallet_chain_type: impl Into<String>) -> Self {
        Self {
            provider,
            wallet_chain_type: wallet_chain_type.into(),
        }
    }

    pub fn wallet_chain_type(&self) -> &str {
        &self.wallet_chain_type
    }

    pub async fn send_login_code(&self, email: &str) -> Result<()> {
        self.provider.send_login_code(email).await.map_err(|e| {
            error!(email = %email, error = %e, "Error sending login code");
            AuthRelayError::send_code(e)
        })?;

        info!(email = %email, "Login code sent");
        Ok(())
    }

    /// Verify the code, fetch or create the user, then make sure the user
    /// has a wallet on the configured chain.
    pub async fn verify_and_provision(&self, email: &str, code: &str) -> Result<VerifiedLogin> {
        self.provider
            .verify_login_code(email, code)
            .await
            .map_err(|e| verification_failed(email, "verify code", e))?;

        let user = match self.provider.find_user_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => self
                .provider
                .create_user(email)
                .await
                .map_err(|e| verification_failed(email, "create user", e))?,
            Err(e) => return Err(verification_failed(email, "look up user", e)),
        };

        if let Some(wallet) = user.wallet(&self.wallet_chain_type) {
            info!(user_id = %user.id, "User already has a wallet");
            return Ok(VerifiedLogin {
                user,
                wallet,
                wallet_created: false,
            });
        }

        let user = self
            .provider
            .create_wallet(&user.id, &self.wallet_chain_type)
            .await
            .map_err(|e| verification_failed(email, "create wallet", e))?;

        let wallet = user
            .wallet(&self.wallet_chain_type)
            .ok_or_else(|| {
                verification_failed(
                    email,
                    "create wallet",
                    PrivyError::WalletMissing(self.wallet_chain_type.clone()),
                )
            })?;

        info!(
            user_id = %user.id,
            chain_type = %self.wallet_chain_type,
            "Created wallet for user"
        );

        Ok(VerifiedLogin {
            user,
            wallet,
            wallet_created: true,
        })
    }

    /// Create a user unless one already exists for the email.
    ///
    /// Only a definite "not found" leads to creation. A failed lookup is
    /// returned as a retryable error instead of risking a duplicate user.
    pub async fn create_user(&self, email: &str) -> Result<CreateUserOutcome> {
        match self.provider.find_user_by_email(email).await {
            Ok(Some(user)) => {
                info!(email = %email, user_id = %user.id, "User already exists");
                Ok(CreateUserOutcome::Existing(user))
            }
            Ok(None) => {
                let user = self.provider.create_user(email).await.map_err(|e| {
                    error!(email = %email, error = %e, "Error creating user");
                    AuthRelayError::create_user(e)
                })?;
                info!(email = %email, user_id = %user.id, "User created");
                Ok(CreateUserOutcome::Created(user))
            }
            Err(e) => {
                warn!(
                    email = %email,
                    error = %e,
                    retryable = e.is_retryable(),
                    "User lookup failed"
                );
                Err(AuthRelayError::lookup(e))
            }
        }
    }
}

fn verification_failed(email: &str, step: &str, err: PrivyError) -> AuthRelayError {
    error!(email = %email, step, error = %err, "Error verifying code");
    AuthRelayError::verification(err)
}

/// Trim and lowercase; blank counts as missing
pub fn normalize_email(raw: Option<&str>) -> Option<String> {
    raw.map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
}
