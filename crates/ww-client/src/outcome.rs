//! Uniform completion shape for every waterwheel operation.

use crate::error::Error;
use crate::response::RawResponse;

/// The result of one logical operation.
///
/// Exactly one of these holds:
/// - `success == true`, `error == None`
/// - `success == false`, `error == Some(_)`
///
/// `response` carries the raw response whenever the server answered, on
/// both paths. `json` is only ever populated on success.
#[derive(Debug)]
pub struct ResponseOutcome<E = Error> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The raw response, if the server answered at all.
    pub response: Option<RawResponse>,
    /// Parsed JSON body, if the operation succeeded and the body was non-empty JSON.
    pub json: Option<serde_json::Value>,
    /// The failure, if the operation did not succeed.
    pub error: Option<E>,
}

impl<E> ResponseOutcome<E> {
    /// A successful outcome.
    pub fn succeeded(response: Option<RawResponse>, json: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            response,
            json,
            error: None,
        }
    }

    /// A failed outcome.
    pub fn failed(response: Option<RawResponse>, error: E) -> Self {
        Self {
            success: false,
            response,
            json: None,
            error: Some(error),
        }
    }

    /// Returns true if the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// HTTP status of the raw response, if any.
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Raw response body, if any.
    pub fn body(&self) -> Option<&str> {
        self.response.as_ref().map(|r| r.body.as_str())
    }

    /// Convert the error type, keeping everything else.
    pub fn map_err<F, O>(self, f: F) -> ResponseOutcome<O>
    where
        F: FnOnce(E) -> O,
    {
        ResponseOutcome {
            success: self.success,
            response: self.response,
            json: self.json,
            error: self.error.map(f),
        }
    }

    /// Collapse into a `Result`, dropping the raw response.
    pub fn into_result(self) -> std::result::Result<Option<serde_json::Value>, E> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.json),
        }
    }
}
