//! Error types for ww-rest.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The underlying transport error, if this error wraps one.
    pub fn client_error(&self) -> Option<&waterwheel_client::Error> {
        let source = self.source.as_deref()?;
        source
            .downcast_ref::<waterwheel_client::Error>()
            .or_else(|| {
                source
                    .downcast_ref::<waterwheel_auth::Error>()
                    .and_then(waterwheel_auth::Error::client_error)
            })
    }

    /// The underlying auth error, if this error wraps one.
    pub fn auth_error(&self) -> Option<&waterwheel_auth::Error> {
        self.source
            .as_deref()
            .and_then(|s| s.downcast_ref::<waterwheel_auth::Error>())
    }

    /// Returns true if a success-status body was not valid JSON.
    pub fn is_parse(&self) -> bool {
        self.client_error().is_some_and(waterwheel_client::Error::is_parse)
    }

    /// Returns true if the request failed in transit or came back non-2xx.
    pub fn is_transport(&self) -> bool {
        self.client_error()
            .is_some_and(waterwheel_client::Error::is_transport)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),
}

impl From<waterwheel_client::Error> for Error {
    fn from(err: waterwheel_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<waterwheel_auth::Error> for Error {
    fn from(err: waterwheel_auth::Error) -> Self {
        Error {
            kind: ErrorKind::Auth(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
