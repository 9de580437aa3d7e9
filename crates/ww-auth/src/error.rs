//! Error types for ww-auth.
//!
//! Error messages are designed to avoid exposing credential data.

/// Result type alias for ww-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ww-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The underlying transport error, if this error wraps one.
    pub fn client_error(&self) -> Option<&waterwheel_client::Error> {
        self.source
            .as_ref()
            .and_then(|s| s.downcast_ref::<waterwheel_client::Error>())
    }

    /// Returns true if the login POST itself was rejected.
    pub fn is_login_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::Login(_))
    }

    /// Returns true if the CSRF token could not be fetched.
    pub fn is_csrf_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::CsrfToken(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The login form POST failed.
    #[error("Login failed: {0}")]
    Login(String),

    /// The CSRF token GET failed.
    #[error("CSRF token fetch failed: {0}")]
    CsrfToken(String),

    /// The logout GET failed.
    #[error("Logout failed: {0}")]
    Logout(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Transport-level error outside the login flow.
    #[error("Client error: {0}")]
    Client(String),
}

impl From<waterwheel_client::Error> for Error {
    fn from(err: waterwheel_client::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}
