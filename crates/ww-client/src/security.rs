//! Security utilities for Drupal REST requests.
//!
//! ## Path Segment Encoding
//!
//! Request paths are concatenated verbatim onto the base URL; nothing in
//! the request pipeline escapes them. User-provided values that end up in a
//! path MUST be encoded by the caller:
//!
//! ```rust
//! use waterwheel_client::security::encode_path_segment;
//!
//! // CORRECT
//! let id = encode_path_segment("42?_format=xml");
//! let path = format!("node/{}", id);
//! assert_eq!(path, "node/42%3F_format%3Dxml");
//!
//! // WRONG - NEVER do this with user input
//! // let path = format!("node/{}", user_id);
//! ```
//!
//! ## Error Message Sanitizing
//!
//! Response bodies folded into error messages pass through
//! [`sanitize_error_message`] so credentials echoed back by a server never
//! reach logs.

use std::sync::LazyLock;

use regex_lite::Regex;

const MAX_MESSAGE_LENGTH: usize = 500;

static BASIC_AUTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)basic\s+[A-Za-z0-9+/=]{4,}").expect("valid regex"));

static CSRF_HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)x-csrf-token[:=]\s*\S+").expect("valid regex"));

static SESSION_COOKIE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S?SESS[A-Za-z0-9]+=[A-Za-z0-9%_-]+").expect("valid regex"));

/// Percent-encode a single path segment.
#[must_use]
pub fn encode_path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// This function:
/// - Redacts `Basic <credentials>` values
/// - Redacts `X-CSRF-Token` header values
/// - Redacts Drupal session cookies (`SESS…=` / `SSESS…=`)
/// - Truncates messages longer than 500 characters
#[must_use]
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = BASIC_AUTH_PATTERN
        .replace_all(message, "Basic [REDACTED]")
        .to_string();
    sanitized = CSRF_HEADER_PATTERN
        .replace_all(&sanitized, "X-CSRF-Token: [REDACTED]")
        .to_string();
    sanitized = SESSION_COOKIE_PATTERN
        .replace_all(&sanitized, "SESS[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_MESSAGE_LENGTH {
        let mut cut = MAX_MESSAGE_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
