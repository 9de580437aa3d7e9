//! Login, CSRF token and logout flow.
//!
//! The login endpoint is Drupal's legacy form handler, not a REST resource,
//! so it is the one request sent form-encoded and without signing headers.

use tracing::{debug, instrument, warn};

use waterwheel_client::{HttpClient, ResponseOutcome};

use crate::error::{Error, ErrorKind};
use crate::session::SessionState;
use crate::{CSRF_TOKEN_PATH, LOGIN_PATH, LOGOUT_PATH};

/// `form_id` value expected by Drupal's user login form.
pub const LOGIN_FORM_ID: &str = "user_login_form";

/// Drives login, CSRF token acquisition and logout for one session.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    http: HttpClient,
    session: SessionState,
}

impl AuthFlow {
    /// Create a flow over a transport and a session handle.
    pub fn new(http: HttpClient, session: SessionState) -> Self {
        Self { http, session }
    }

    /// The session this flow mutates.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Log in through the user login form, then fetch a CSRF token.
    ///
    /// The outcome reflects the token fetch: login only succeeds if both
    /// the form POST and the token GET succeed. If the POST fails, no token
    /// fetch is attempted.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ResponseOutcome<Error> {
        let url = format!("{}{}", self.session.base_url(), LOGIN_PATH);
        let request = self.http.post(url).form([
            ("name", username),
            ("pass", password),
            ("form_id", LOGIN_FORM_ID),
        ]);

        let outcome = self.http.send_text(request).await;
        if !outcome.success {
            debug!(status = ?outcome.status(), "Login form rejected");
            return outcome.map_err(|err| {
                Error::with_source(ErrorKind::Login(err.to_string()), err)
            });
        }

        let _pending = PendingCsrfFetch::begin(&self.session);
        let outcome = self.request_csrf_token().await;
        if let Some(ref err) = outcome.error {
            warn!(error = %err, "Login succeeded but CSRF token fetch failed");
        }
        outcome
    }

    /// Fetch a CSRF token for the current session and start signing with it.
    ///
    /// The response body is stored verbatim. On failure any previously held
    /// token stays in place.
    #[instrument(skip(self))]
    pub async fn fetch_csrf_token(&self) -> ResponseOutcome<Error> {
        self.request_csrf_token().await
    }

    async fn request_csrf_token(&self) -> ResponseOutcome<Error> {
        let url = format!("{}{}", self.session.base_url(), CSRF_TOKEN_PATH);
        let outcome = self.http.send_text(self.http.get(url)).await;

        let token = outcome
            .response
            .as_ref()
            .filter(|_| outcome.success)
            .map(|raw| raw.body.clone());

        match token {
            Some(token) => {
                self.session.store_csrf_token(token);
                debug!("CSRF token stored");
                outcome.map_err(Error::from)
            }
            None => outcome.map_err(|err| {
                Error::with_source(ErrorKind::CsrfToken(err.to_string()), err)
            }),
        }
    }

    /// Log out of the current session.
    ///
    /// Any 2xx response counts as success; the body is parsed as JSON only
    /// when it is JSON. The CSRF token is left in place.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ResponseOutcome<Error> {
        let url = format!("{}{}", self.session.base_url(), LOGOUT_PATH);
        let outcome = self.http.send_text(self.http.get(url)).await;

        match outcome.error {
            None => {
                debug!(status = ?outcome.status(), "Logged out");
                let json = outcome
                    .response
                    .as_ref()
                    .and_then(|raw| raw.parse_json().ok().flatten());
                ResponseOutcome::succeeded(outcome.response, json)
            }
            Some(err) => {
                warn!(error = %err, "Logout request failed");
                ResponseOutcome::failed(
                    outcome.response,
                    Error::with_source(ErrorKind::Logout(err.to_string()), err),
                )
            }
        }
    }
}

/// Holds the session in `CsrfPending` for the lifetime of the guard.
///
/// Only the guard releases its hold, so an unrelated fetch failing cannot
/// end another login's pending state. Dropping the login future mid-fetch
/// drops the guard too.
struct PendingCsrfFetch<'a> {
    session: &'a SessionState,
}

impl<'a> PendingCsrfFetch<'a> {
    fn begin(session: &'a SessionState) -> Self {
        session.begin_csrf_fetch();
        Self { session }
    }
}

impl Drop for PendingCsrfFetch<'_> {
    fn drop(&mut self) {
        self.session.end_csrf_fetch();
    }
}
