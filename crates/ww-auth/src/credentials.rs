//! Basic Auth credentials.
//!
//! Credentials implement custom Debug to redact the password.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, ErrorKind, Result};

/// A username/password pair for HTTP Basic Auth.
///
/// No validation is applied; empty values are accepted as given.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BasicCredentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `WATERWHEEL_USERNAME` or `DRUPAL_USERNAME`
    /// - `WATERWHEEL_PASSWORD` or `DRUPAL_PASSWORD`
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("WATERWHEEL_USERNAME")
            .or_else(|_| std::env::var("DRUPAL_USERNAME"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("WATERWHEEL_USERNAME".to_string())))?;

        let password = std::env::var("WATERWHEEL_PASSWORD")
            .or_else(|_| std::env::var("DRUPAL_PASSWORD"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("WATERWHEEL_PASSWORD".to_string())))?;

        Ok(Self::new(username, password))
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Authorization` header value: `Basic base64(username:password)`.
    pub fn authorization_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}
