//! Core HTTP transport with status validation and tracing.

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::outcome::ResponseOutcome;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{Response, ResponseExt};

/// HTTP transport for the Drupal REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .cookie_store(config.cookie_store)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Patch, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Send a request and return the response whatever its status.
    ///
    /// Only failures to get a response at all are errors here.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.body(body.encode()?);
        }

        if self.config.enable_tracing {
            debug!(
                method = %request.method,
                url = %request.url,
                body_encoding = ?request.body_encoding(),
                "Sending request"
            );
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(Response::new(response))
    }

    /// Send a request, requiring a 2xx status.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.execute(request).await?.check_status().await
    }

    /// Send a request and deserialize the 2xx JSON body into `T`.
    pub async fn send_typed<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request).await?.json().await
    }

    /// Send a request and keep the body as opaque text.
    ///
    /// Success requires a 2xx status; the body is never parsed.
    pub async fn send_text(&self, request: RequestBuilder) -> ResponseOutcome {
        let response = match self.execute(request).await {
            Ok(response) => response,
            Err(err) => return ResponseOutcome::failed(None, err),
        };

        let raw = match response.into_raw().await {
            Ok(raw) => raw,
            Err(err) => return ResponseOutcome::failed(None, err),
        };

        match raw.error_for_status() {
            Some(err) => ResponseOutcome::failed(Some(raw), err),
            None => ResponseOutcome::succeeded(Some(raw), None),
        }
    }

    /// Send a request and parse the 2xx body as JSON.
    ///
    /// An empty success body yields `json: None`; a non-empty body that is
    /// not JSON fails with a parse error.
    pub async fn send_json(&self, request: RequestBuilder) -> ResponseOutcome {
        let outcome = self.send_text(request).await;
        if !outcome.success {
            return outcome;
        }

        let Some(raw) = outcome.response else {
            return ResponseOutcome::succeeded(None, None);
        };

        match raw.parse_json() {
            Ok(json) => ResponseOutcome::succeeded(Some(raw), json),
            Err(err) => ResponseOutcome::failed(Some(raw), err),
        }
    }
}
