//! Drupal REST API client.
//!
//! This client owns an `HttpClient` and a `SessionState` handle and provides
//! generic verb methods plus entity CRUD helpers. Every request is built from
//! a fresh session snapshot.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{instrument, warn};

use waterwheel_auth::{AuthFlow, SessionState};
use waterwheel_client::{ClientConfig, HttpClient, RequestMethod, ResponseOutcome};

use crate::entity::EntityType;
use crate::error::{Error, Result};
use crate::request::build_request;

/// Pass as `params` when a call has nothing to send.
pub const NO_PARAMS: Option<&serde_json::Value> = None;

/// Drupal REST API client.
///
/// Provides:
/// - Generic `get`/`post`/`patch`/`delete` on any REST path
/// - Entity CRUD for nodes and comments
/// - The login / CSRF token / logout flow
///
/// Clones share the connection pool and the session.
///
/// # Example
///
/// ```rust,ignore
/// use waterwheel_rest::{EntityType, WaterwheelClient, NO_PARAMS};
///
/// let client = WaterwheelClient::new("https://drupal.example.com")?;
/// client.login("alice", "secret").await.into_result()?;
///
/// let comment = client.entity_get(EntityType::Comment, "7", NO_PARAMS).await;
/// client
///     .node_patch("1", Some(&json!({"title": [{"value": "Renamed"}]})))
///     .await
///     .into_result()?;
/// ```
#[derive(Debug, Clone)]
pub struct WaterwheelClient {
    http: HttpClient,
    session: SessionState,
    auth: AuthFlow,
}

impl WaterwheelClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Self::from_session(SessionState::new(base_url), config)
    }

    /// Create a client over an existing session handle.
    pub fn from_session(session: SessionState, config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(config)?;
        Ok(Self::from_parts(http, session))
    }

    /// Create a client from a session configured in the environment.
    ///
    /// See [`SessionState::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::from_session(SessionState::from_env()?, ClientConfig::default())
    }

    /// Create a client from an existing transport and session.
    pub fn from_parts(http: HttpClient, session: SessionState) -> Self {
        let auth = AuthFlow::new(http.clone(), session.clone());
        Self {
            http,
            session,
            auth,
        }
    }

    /// The session handle this client signs requests from.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The underlying transport.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Replace the base URL.
    pub fn set_base_url(&self, base_url: impl Into<String>) {
        self.session.set_base_url(base_url);
    }

    /// Sign every subsequent request with Basic Auth.
    pub fn set_basic_credentials(&self, username: impl Into<String>, password: impl Into<String>) {
        self.session.set_basic_credentials(username, password);
    }

    // =========================================================================
    // Session Flow
    // =========================================================================

    /// Log in through the user login form and fetch a CSRF token.
    pub async fn login(&self, username: &str, password: &str) -> ResponseOutcome<Error> {
        self.auth.login(username, password).await.map_err(Error::from)
    }

    /// Fetch a fresh CSRF token.
    pub async fn fetch_csrf_token(&self) -> ResponseOutcome<Error> {
        self.auth.fetch_csrf_token().await.map_err(Error::from)
    }

    /// Log out. The CSRF token is kept.
    pub async fn logout(&self) -> ResponseOutcome<Error> {
        self.auth.logout().await.map_err(Error::from)
    }

    // =========================================================================
    // Generic Verbs
    // =========================================================================

    /// Send one signed JSON request.
    #[instrument(skip(self, params), fields(method = %method))]
    pub async fn send_request<P>(
        &self,
        path: &str,
        method: RequestMethod,
        params: Option<&P>,
    ) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        let request = match build_request(&self.session.snapshot(), path, method, params) {
            Ok(request) => request,
            Err(err) => return ResponseOutcome::failed(None, err),
        };

        self.http.send_json(request).await.map_err(Error::from)
    }

    /// GET a path.
    ///
    /// `params` is never sent: GET requests carry no body, and params are
    /// not turned into a query string either. Kept for call-site symmetry
    /// with the other verbs.
    pub async fn get<P>(&self, path: &str, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        if params.is_some() {
            warn!(path, "GET ignores params; nothing is sent");
        }
        self.send_request(path, RequestMethod::Get, NO_PARAMS).await
    }

    /// POST `params` as JSON to a path.
    pub async fn post<P>(&self, path: &str, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.send_request(path, RequestMethod::Post, params).await
    }

    /// PATCH `params` as JSON to a path.
    pub async fn patch<P>(&self, path: &str, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.send_request(path, RequestMethod::Patch, params).await
    }

    /// DELETE a path, sending `params` as JSON if given.
    pub async fn delete<P>(&self, path: &str, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.send_request(path, RequestMethod::Delete, params).await
    }

    // =========================================================================
    // Entity Operations
    // =========================================================================

    /// GET `{type}/{id}`.
    pub async fn entity_get<P>(
        &self,
        entity_type: EntityType,
        id: &str,
        params: Option<&P>,
    ) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.get(&entity_type.item_path(id), params).await
    }

    /// POST to `entity/{type}` to create an entity.
    pub async fn entity_post<P>(
        &self,
        entity_type: EntityType,
        params: Option<&P>,
    ) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.post(&entity_type.create_path(), params).await
    }

    /// PATCH `{type}/{id}`.
    pub async fn entity_patch<P>(
        &self,
        entity_type: EntityType,
        id: &str,
        params: Option<&P>,
    ) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.patch(&entity_type.item_path(id), params).await
    }

    /// DELETE `{type}/{id}`.
    pub async fn entity_delete<P>(
        &self,
        entity_type: EntityType,
        id: &str,
        params: Option<&P>,
    ) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.delete(&entity_type.item_path(id), params).await
    }

    /// GET `{type}/{id}` and deserialize the entity into `T`.
    pub async fn entity_load<T: DeserializeOwned>(
        &self,
        entity_type: EntityType,
        id: &str,
    ) -> Result<T> {
        let request = build_request(
            &self.session.snapshot(),
            &entity_type.item_path(id),
            RequestMethod::Get,
            NO_PARAMS,
        )?;
        self.http.send_typed(request).await.map_err(Into::into)
    }

    /// GET `node/{id}`.
    pub async fn node_get<P>(&self, id: &str, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.entity_get(EntityType::Node, id, params).await
    }

    /// POST to `entity/node`.
    pub async fn node_post<P>(&self, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.entity_post(EntityType::Node, params).await
    }

    /// PATCH `node/{id}`.
    pub async fn node_patch<P>(&self, id: &str, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.entity_patch(EntityType::Node, id, params).await
    }

    /// DELETE `node/{id}`.
    pub async fn node_delete<P>(&self, id: &str, params: Option<&P>) -> ResponseOutcome<Error>
    where
        P: Serialize + ?Sized,
    {
        self.entity_delete(EntityType::Node, id, params).await
    }
}
