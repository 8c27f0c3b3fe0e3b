//! Service location and account credentials, loaded from the environment.
//!
//! Credentials are never stored in source. `.env` is honored for local runs.

use std::env;
use std::fmt;

use crate::client::DEFAULT_BASE_URL;

pub const BASE_URL_VAR: &str = "PETFRIENDS_BASE_URL";
pub const EMAIL_VAR: &str = "PETFRIENDS_EMAIL";
pub const PASSWORD_VAR: &str = "PETFRIENDS_PASSWORD";

/// Errors that can occur when loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required secret: {0}")]
    MissingSecret(String),
}

#[derive(Clone)]
pub struct Settings {
    pub base_url: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Settings {
    /// Load `.env` if present, then read the environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        let _ = dotenvy::dotenv();
        Self::from_env_inner()
    }

    pub(crate) fn from_env_inner() -> Result<Self, SettingsError> {
        let base_url = env::var(BASE_URL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url,
            email: required(EMAIL_VAR)?,
            password: required(PASSWORD_VAR)?,
        })
    }
}

fn required(name: &str) -> Result<String, SettingsError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SettingsError::MissingSecret(name.to_string())),
    }
}
