//! # ww-rest
//!
//! Drupal REST API client with generic verbs and entity CRUD helpers.
//!
//! ## Features
//!
//! - **Generic verbs** - `get`, `post`, `patch`, `delete` on any REST path
//! - **Entity CRUD** - `entity_get`/`entity_post`/`entity_patch`/`entity_delete`
//!   for nodes and comments, with `node_*` shorthands
//! - **Session signing** - Basic Auth and CSRF headers attached from the
//!   session on every request
//! - **Login flow** - `login`, `fetch_csrf_token`, `logout`
//!
//! ## Example
//!
//! ```rust,ignore
//! use waterwheel_rest::{WaterwheelClient, NO_PARAMS};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WaterwheelClient::new("https://drupal.example.com")?;
//!     client.set_basic_credentials("admin", "admin");
//!
//!     // Create
//!     let created = client
//!         .node_post(Some(&serde_json::json!({
//!             "type": [{"target_id": "article"}],
//!             "title": [{"value": "Hello"}]
//!         })))
//!         .await
//!         .into_result()?;
//!
//!     // Read
//!     let node = client.node_get("1", NO_PARAMS).await.into_result()?;
//!
//!     // Delete
//!     client.node_delete("1", NO_PARAMS).await.into_result()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Paths
//!
//! Paths are appended to the base URL verbatim, followed by `?_format=json`.
//! Escaping user-provided segments is the caller's job; see
//! [`waterwheel_client::security::encode_path_segment`].

mod client;
mod entity;
mod error;
mod request;

pub use client::{WaterwheelClient, NO_PARAMS};
pub use entity::EntityType;
pub use error::{Error, ErrorKind, Result};
pub use request::build_request;

// Re-export types that users of the client will need
pub use waterwheel_auth::{AuthState, SessionState};
pub use waterwheel_client::{ClientConfig, ClientConfigBuilder, RequestMethod, ResponseOutcome};
