//! # ww-client
//!
//! Core HTTP transport for the Drupal REST API.
//!
//! This crate provides the foundational pieces every other waterwheel crate
//! builds on:
//! - Request descriptors (`RequestBuilder`) with JSON or form-urlencoded bodies
//! - A reqwest-backed transport (`HttpClient`) with 2xx status validation
//! - A uniform completion shape (`ResponseOutcome`)
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (ww-rest entity helpers, ww-auth login flow)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    RequestBuilder                           │
//! │  - URL, method, headers, body + encoding                    │
//! │  - Built fresh per call, discarded after send               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HttpClient                             │
//! │  - Raw HTTP over reqwest, compression, connection pooling   │
//! │  - Status validation (2xx) and error classification         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use waterwheel_client::{ClientConfig, HttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), waterwheel_client::Error> {
//!     let http = HttpClient::new(ClientConfig::default())?;
//!
//!     let outcome = http
//!         .send_json(http.get("https://example.com/node/1?_format=json"))
//!         .await;
//!
//!     if let Some(json) = outcome.json {
//!         println!("{}", json["title"][0]["value"]);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod outcome;
mod request;
mod response;
pub mod security;

pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use outcome::ResponseOutcome;
pub use request::{BodyEncoding, RequestBody, RequestBuilder, RequestMethod};
pub use response::{RawResponse, Response, ResponseExt};

/// Query suffix appended to every REST resource path.
pub const REQUEST_FORMAT: &str = "?_format=json";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("waterwheel/", env!("CARGO_PKG_VERSION"));
