use anyhow::{Context, Result};
use serde::Serialize;
use std::env;

/// Listen port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Replaces provider error details in production responses
pub const REDACTED_DETAIL: &str = "An internal error occurred";

/// Deployment environment, read from `NODE_ENV` (falling back to `APP_ENV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn from_env() -> Self {
        env::var("NODE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    /// Error detail safe to return to callers in this environment
    pub fn redact(self, detail: impl Into<String>) -> String {
        if self.is_production() {
            REDACTED_DETAIL.to_string()
        } else {
            detail.into()
        }
    }
}

/// `PORT`, defaulting to 3000. A value that is not a port number is a startup error.
pub fn port_from_env() -> Result<u16> {
    match env::var("PORT") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT: {}", raw)),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// Load `.env` if present
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded .env file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn parse_recognises_production_aliases() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse(" PROD "), Environment::Production);
        assert_eq!(Environment::parse("test"), Environment::Test);
        assert_eq!(Environment::parse("staging"), Environment::Development);
    }

    #[test]
    fn redact_only_in_production() {
        assert_eq!(
            Environment::Production.redact("Privy API error: 500"),
            REDACTED_DETAIL
        );
        assert_eq!(
            Environment::Development.redact("Privy API error: 500"),
            "Privy API error: 500"
        );
    }

    #[test]
    #[serial]
    fn node_env_takes_precedence_over_app_env() {
        env::set_var("NODE_ENV", "production");
        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("NODE_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);
    }

    #[test]
    #[serial]
    fn port_defaults_and_rejects_garbage() {
        env::remove_var("PORT");
        assert_eq!(port_from_env().unwrap(), DEFAULT_PORT);

        env::set_var("PORT", "8080");
        assert_eq!(port_from_env().unwrap(), 8080);

        env::set_var("PORT", "eighty");
        assert!(port_from_env().is_err());

        env::remove_var("PORT");
    }
}
