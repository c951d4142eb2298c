use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tribes_common::{port_from_env, Environment};
use tribes_fcm_shared::{FCMClient, ServiceAccountKey, DEFAULT_FCM_API_URL};

use crate::services::DEFAULT_TOPIC_PREFIX;

/// Key file looked up in the working directory when no path is configured
pub const DEFAULT_CREDENTIALS_FILE: &str = "serviceAccountKey.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub fcm: FcmSettings,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct FcmSettings {
    pub credentials_path: PathBuf,
    /// Overrides the key's own `project_id`
    pub project_id: Option<String>,
    pub api_url: String,
    pub topic_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            app: AppConfig {
                env: Environment::from_env(),
                port: port_from_env()?,
            },
            fcm: FcmSettings::from_env(),
        })
    }
}

impl FcmSettings {
    pub fn from_env() -> Self {
        Self {
            credentials_path: resolve_credentials_path(),
            project_id: non_empty_var("FCM_PROJECT_ID"),
            api_url: non_empty_var("FCM_API_URL")
                .unwrap_or_else(|| DEFAULT_FCM_API_URL.to_string()),
            topic_prefix: env::var("FCM_TOPIC_PREFIX")
                .unwrap_or_else(|_| DEFAULT_TOPIC_PREFIX.to_string()),
        }
    }

    /// Load the service account key and construct the client.
    ///
    /// Any failure here must stop the process before it binds its port.
    pub fn build_client(&self) -> Result<FCMClient> {
        let key = ServiceAccountKey::from_file(&self.credentials_path).with_context(|| {
            format!(
                "Failed to load FCM credentials from {}",
                self.credentials_path.display()
            )
        })?;

        let mut client = FCMClient::new(key)
            .context("Failed to construct FCM client")?
            .with_api_url(self.api_url.clone());

        if let Some(project_id) = &self.project_id {
            client = client.with_project_id(project_id.clone());
        }

        Ok(client)
    }
}

/// `FCM_SERVICE_ACCOUNT_PATH`, then `GOOGLE_APPLICATION_CREDENTIALS`, then `./serviceAccountKey.json`
fn resolve_credentials_path() -> PathBuf {
    non_empty_var("FCM_SERVICE_ACCOUNT_PATH")
        .or_else(|| non_empty_var("GOOGLE_APPLICATION_CREDENTIALS"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_credentials_env() {
        env::remove_var("FCM_SERVICE_ACCOUNT_PATH");
        env::remove_var("GOOGLE_APPLICATION_CREDENTIALS");
    }

    #[test]
    #[serial]
    fn explicit_path_wins_over_application_default() {
        env::set_var("FCM_SERVICE_ACCOUNT_PATH", "/etc/tribes/fcm.json");
        env::set_var("GOOGLE_APPLICATION_CREDENTIALS", "/etc/gcp/adc.json");
        assert_eq!(
            resolve_credentials_path(),
            PathBuf::from("/etc/tribes/fcm.json")
        );

        env::remove_var("FCM_SERVICE_ACCOUNT_PATH");
        assert_eq!(resolve_credentials_path(), PathBuf::from("/etc/gcp/adc.json"));

        clear_credentials_env();
        assert_eq!(
            resolve_credentials_path(),
            PathBuf::from(DEFAULT_CREDENTIALS_FILE)
        );
    }

    #[test]
    #[serial]
    fn defaults_apply_when_unset() {
        env::remove_var("FCM_TOPIC_PREFIX");
        env::remove_var("FCM_API_URL");
        env::remove_var("FCM_PROJECT_ID");

        let settings = FcmSettings::from_env();
        assert_eq!(settings.topic_prefix, DEFAULT_TOPIC_PREFIX);
        assert_eq!(settings.api_url, DEFAULT_FCM_API_URL);
        assert!(settings.project_id.is_none());
    }

    #[test]
    #[serial]
    fn missing_credentials_fail_client_construction() {
        clear_credentials_env();
        env::set_var("FCM_SERVICE_ACCOUNT_PATH", "/nonexistent/tribes/key.json");

        let err = FcmSettings::from_env().build_client().unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/tribes/key.json"));

        clear_credentials_env();
    }
}
