//! # ww-auth
//!
//! Session authentication for the Drupal REST API.
//!
//! ## Security
//!
//! - Passwords and CSRF tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages are sanitized before they carry response bodies
//!
//! ## Supported Authentication Methods
//!
//! - **Basic Auth** - `Authorization: Basic …` attached to every request once
//!   credentials are set on the session
//! - **User login form** - form-encoded POST to `/user/login`, followed by a
//!   CSRF token fetch from `/rest/session/token`
//!
//! The two are independent: Basic Auth signing is a flag on the session,
//! while the login flow drives the CSRF state machine
//! (`Anonymous → CsrfPending → Authenticated`).
//!
//! ## Example
//!
//! ```rust,ignore
//! use waterwheel_auth::{AuthFlow, SessionState};
//! use waterwheel_client::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SessionState::new("https://drupal.example.com");
//!     let flow = AuthFlow::new(HttpClient::default_client()?, session.clone());
//!
//!     let outcome = flow.login("alice", "secret").await;
//!     assert!(outcome.success);
//!     assert!(session.is_signing_csrf());
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod flow;
mod session;

pub use credentials::BasicCredentials;
pub use error::{Error, ErrorKind, Result};
pub use flow::{AuthFlow, LOGIN_FORM_ID};
pub use session::{AuthState, SessionSnapshot, SessionState};

/// Header carrying the CSRF token on signed requests.
pub const CSRF_TOKEN_HEADER: &str = "X-CSRF-Token";

/// Path of the legacy login form handler.
pub const LOGIN_PATH: &str = "/user/login";

/// Path of the logout handler.
pub const LOGOUT_PATH: &str = "/user/logout";

/// Path that returns a plain-text CSRF token for the current session.
pub const CSRF_TOKEN_PATH: &str = "/rest/session/token";
