//! # waterwheel
//!
//! A client library for the Drupal 8 REST API.
//!
//! Point a client at a Drupal site, pick an authentication mode (HTTP Basic
//! or a cookie session with a CSRF token), then read and write entities as
//! JSON.
//!
//! ## Security
//!
//! - Credentials and CSRF tokens are redacted in Debug output
//! - Tracing skips password parameters
//! - Error messages are sanitized before they are surfaced
//!
//! ## Crates
//!
//! - **waterwheel-client** - HTTP transport, response outcomes, error types
//! - **waterwheel-auth** - Session state, Basic credentials, login/CSRF/logout flow
//! - **waterwheel-rest** - Generic verbs and entity CRUD for nodes and comments
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waterwheel::{WaterwheelClient, NO_PARAMS};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WaterwheelClient::new("https://drupal.example.com")?;
//!
//!     // Cookie session + CSRF token
//!     client.login("editor", "secret").await.into_result()?;
//!
//!     let node = client.node_get("1", NO_PARAMS).await.into_result()?;
//!     if let Some(node) = node {
//!         println!("{}", node["title"][0]["value"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use waterwheel_auth as auth;
#[cfg(feature = "client")]
pub use waterwheel_client as client;
#[cfg(feature = "rest")]
pub use waterwheel_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use waterwheel_auth::{AuthState, BasicCredentials, SessionState};
#[cfg(feature = "client")]
pub use waterwheel_client::{ClientConfig, HttpClient, RequestMethod, ResponseOutcome};
#[cfg(feature = "rest")]
pub use waterwheel_rest::{EntityType, WaterwheelClient, NO_PARAMS};
