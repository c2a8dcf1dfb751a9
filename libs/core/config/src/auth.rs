use crate::{env_or_default, ConfigError, Environment, FromEnv};
use std::env;
use std::fmt;

/// Key accepted outside production when `API_KEY` is not set.
pub const DEVELOPMENT_API_KEY: &str = "Password@2027!";
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret API key configuration.
#[derive(Clone)]
pub struct ApiKeyConfig {
    pub header: String,
    pub key: String,
}

impl ApiKeyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            header: DEFAULT_API_KEY_HEADER.to_string(),
            key: key.into(),
        }
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("header", &self.header)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl FromEnv for ApiKeyConfig {
    /// Reads:
    /// - API_KEY: required when APP_ENV=production, otherwise defaults to the development key
    /// - API_KEY_HEADER: defaults to `x-api-key`
    fn from_env() -> Result<Self, ConfigError> {
        let key = match env::var("API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ if Environment::from_env().is_production() => {
                return Err(ConfigError::MissingEnvVar("API_KEY".to_string()));
            }
            _ => DEVELOPMENT_API_KEY.to_string(),
        };
        let header = env_or_default("API_KEY_HEADER", DEFAULT_API_KEY_HEADER).to_ascii_lowercase();

        Ok(Self { header, key })
    }
}
