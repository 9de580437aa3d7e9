//! Caller-owned session state.
//!
//! `SessionState` is a shared handle: clones observe the same base URL,
//! credentials and CSRF token. Requests never read it field by field;
//! they take a [`SessionSnapshot`] so that each request sees one
//! consistent view, even while a login is rewriting the token.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::credentials::BasicCredentials;
use crate::error::{Error, ErrorKind, Result};
use crate::CSRF_TOKEN_HEADER;

/// Where the session stands in the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No CSRF token has ever been fetched.
    Anonymous,
    /// Login POST succeeded; the CSRF token fetch is in flight.
    CsrfPending,
    /// A CSRF token is held and attached to requests.
    Authenticated,
}

#[derive(Default)]
struct SessionData {
    base_url: String,
    basic: Option<BasicCredentials>,
    csrf_token: Option<String>,
    /// Logins currently waiting on their token fetch.
    csrf_pending: usize,
}

/// Base URL, Basic Auth credentials and CSRF token for one Drupal site.
///
/// Basic Auth signing is on exactly when credentials have been set.
/// CSRF signing is on exactly when a token fetch has succeeded; it is never
/// turned off again, not even by logout.
#[derive(Clone, Default)]
pub struct SessionState {
    inner: Arc<RwLock<SessionData>>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.inner.read();
        f.debug_struct("SessionState")
            .field("base_url", &data.base_url)
            .field("basic", &data.basic)
            .field("csrf_token", &data.csrf_token.as_ref().map(|_| "[REDACTED]"))
            .field("csrf_pending", &data.csrf_pending)
            .finish()
    }
}

impl SessionState {
    /// Create a session for the given base URL.
    ///
    /// The URL is stored as given; no trailing-slash trimming or other
    /// normalization takes place.
    pub fn new(base_url: impl Into<String>) -> Self {
        let session = Self::default();
        session.set_base_url(base_url);
        session
    }

    /// Load a session from environment variables.
    ///
    /// Required:
    /// - `WATERWHEEL_BASE_URL` or `DRUPAL_URL`
    ///
    /// Optional (both or neither):
    /// - `WATERWHEEL_USERNAME` / `DRUPAL_USERNAME`
    /// - `WATERWHEEL_PASSWORD` / `DRUPAL_PASSWORD`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("WATERWHEEL_BASE_URL")
            .or_else(|_| std::env::var("DRUPAL_URL"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("WATERWHEEL_BASE_URL".to_string())))?;

        let session = Self::new(base_url);
        match BasicCredentials::from_env() {
            Ok(creds) => session.set_basic(creds),
            Err(Error {
                kind: ErrorKind::EnvVar(_),
                ..
            }) => {}
            Err(err) => return Err(err),
        }

        Ok(session)
    }

    /// Replace the base URL.
    pub fn set_base_url(&self, base_url: impl Into<String>) {
        self.inner.write().base_url = base_url.into();
    }

    /// Set Basic Auth credentials and start signing requests with them.
    pub fn set_basic_credentials(&self, username: impl Into<String>, password: impl Into<String>) {
        self.set_basic(BasicCredentials::new(username, password));
    }

    /// Set Basic Auth credentials from an existing value.
    pub fn set_basic(&self, credentials: BasicCredentials) {
        self.inner.write().basic = Some(credentials);
    }

    /// Get the base URL.
    pub fn base_url(&self) -> String {
        self.inner.read().base_url.clone()
    }

    /// Returns true if requests carry an `Authorization: Basic` header.
    pub fn is_signing_basic(&self) -> bool {
        self.inner.read().basic.is_some()
    }

    /// Returns true if requests carry an `X-CSRF-Token` header.
    pub fn is_signing_csrf(&self) -> bool {
        self.inner.read().csrf_token.is_some()
    }

    /// The current CSRF token, if one has been fetched.
    pub fn csrf_token(&self) -> Option<String> {
        self.inner.read().csrf_token.clone()
    }

    /// Current position in the login flow.
    pub fn auth_state(&self) -> AuthState {
        let data = self.inner.read();
        if data.csrf_pending > 0 {
            AuthState::CsrfPending
        } else if data.csrf_token.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    /// Take a consistent copy of everything a request needs.
    pub fn snapshot(&self) -> SessionSnapshot {
        let data = self.inner.read();
        SessionSnapshot {
            base_url: data.base_url.clone(),
            basic: data.basic.clone(),
            csrf_token: data.csrf_token.clone(),
        }
    }

    pub(crate) fn begin_csrf_fetch(&self) {
        self.inner.write().csrf_pending += 1;
    }

    /// Release one `begin_csrf_fetch`. Other logins still in flight keep
    /// the session pending.
    pub(crate) fn end_csrf_fetch(&self) {
        let mut data = self.inner.write();
        data.csrf_pending = data.csrf_pending.saturating_sub(1);
    }

    /// Store a freshly fetched token; last write wins.
    pub(crate) fn store_csrf_token(&self, token: String) {
        self.inner.write().csrf_token = Some(token);
    }
}

/// An immutable view of a [`SessionState`] taken at one instant.
#[derive(Clone)]
pub struct SessionSnapshot {
    base_url: String,
    basic: Option<BasicCredentials>,
    csrf_token: Option<String>,
}

impl std::fmt::Debug for SessionSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSnapshot")
            .field("base_url", &self.base_url)
            .field("basic", &self.basic)
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SessionSnapshot {
    /// Base URL at snapshot time.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Basic Auth credentials at snapshot time.
    pub fn basic_credentials(&self) -> Option<&BasicCredentials> {
        self.basic.as_ref()
    }

    /// CSRF token at snapshot time.
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Authentication headers derived from this snapshot.
    ///
    /// The Basic Auth value is recomputed on every call, never cached.
    pub fn signing_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(2);
        if let Some(ref creds) = self.basic {
            headers.push(("Authorization", creds.authorization_header()));
        }
        if let Some(ref token) = self.csrf_token {
            headers.push((CSRF_TOKEN_HEADER, token.clone()));
        }
        headers
    }
}
