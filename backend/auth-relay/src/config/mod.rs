use anyhow::{bail, Result};
use std::env;
use std::fmt;
use tribes_common::{port_from_env, Environment};
use tribes_privy_shared::{PrivyClient, PrivyCredentials, DEFAULT_PRIVY_API_URL};

use crate::services::DEFAULT_WALLET_CHAIN_TYPE;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub privy: PrivySettings,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub port: u16,
}

#[derive(Clone)]
pub struct PrivySettings {
    pub app_id: String,
    pub app_secret: String,
    pub api_url: String,
    pub wallet_chain_type: String,
}

impl fmt::Debug for PrivySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivySettings")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("wallet_chain_type", &self.wallet_chain_type)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            app: AppConfig {
                env: Environment::from_env(),
                port: port_from_env()?,
            },
            privy: PrivySettings::from_env()?,
        })
    }
}

impl PrivySettings {
    /// Both app credentials are required; the relay refuses to start without them
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            app_id: required_var("PRIVY_APP_ID")?,
            app_secret: required_var("PRIVY_APP_SECRET")?,
            api_url: non_empty_var("PRIVY_API_URL")
                .unwrap_or_else(|| DEFAULT_PRIVY_API_URL.to_string()),
            wallet_chain_type: non_empty_var("PRIVY_WALLET_CHAIN_TYPE")
                .unwrap_or_else(|| DEFAULT_WALLET_CHAIN_TYPE.to_string()),
        })
    }

    pub fn build_client(&self) -> PrivyClient {
        PrivyClient::new(PrivyCredentials {
            app_id: self.app_id.clone(),
            app_secret: self.app_secret.clone(),
        })
        .with_api_url(self.api_url.clone())
    }
}

fn required_var(name: &str) -> Result<String> {
    match non_empty_var(name) {
        Some(value) => Ok(value),
        None => bail!("{} must be set", name),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
