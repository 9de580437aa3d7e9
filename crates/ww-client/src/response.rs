//! HTTP response handling.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};
use crate::security::sanitize_error_message;

/// Wrapper around a live reqwest response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.text().await?;
        serde_json::from_str(&body).map_err(Into::into)
    }

    /// Read the whole body and detach from the connection.
    pub async fn into_raw(self) -> Result<RawResponse> {
        let status = self.status();
        let headers = self
            .inner
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = self.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// A fully-read HTTP response, kept for the caller alongside the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, names lowercased.
    pub headers: HashMap<String, String>,
    /// Response body decoded as text.
    pub body: String,
}

impl RawResponse {
    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parse the body as JSON.
    ///
    /// An empty or whitespace-only body parses to `None`.
    pub fn parse_json(&self) -> Result<Option<serde_json::Value>> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body).map(Some).map_err(Into::into)
    }

    /// Return an error describing this response if it is not 2xx.
    pub fn error_for_status(&self) -> Option<Error> {
        if self.is_success() {
            None
        } else {
            Some(parse_error_response(self.status, &self.body))
        }
    }
}

/// Extension trait for validating live responses.
pub trait ResponseExt: Sized {
    /// Pass 2xx responses through; turn anything else into an error.
    fn check_status(self) -> impl std::future::Future<Output = Result<Self>> + Send;
}

impl ResponseExt for Response {
    async fn check_status(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, &body))
    }
}

/// Convert a non-2xx status and body into an error kind.
fn parse_error_response(status: u16, body: &str) -> Error {
    // Drupal REST errors come back as {"message": "..."}
    let message = serde_json::from_str::<DrupalErrorResponse>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| body.to_string());
    let sanitized = sanitize_error_message(&message);

    let kind = match status {
        401 => ErrorKind::Authentication(sanitized),
        403 => ErrorKind::Authorization(sanitized),
        404 => ErrorKind::NotFound(sanitized),
        _ => ErrorKind::Http {
            status,
            message: sanitized,
        },
    };

    Error::new(kind)
}

/// Drupal REST error response format.
#[derive(Debug, serde::Deserialize)]
struct DrupalErrorResponse {
    message: String,
}
