//! Session signing and the login flow, driven through the facade.

use super::common::{basic_header, client_for, mount_login_ok, mount_token};
use waterwheel::{AuthState, ClientConfig, SessionState, WaterwheelClient, NO_PARAMS};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Basic Auth
// ============================================================================

#[tokio::test]
async fn test_basic_header_recomputed_per_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/node/1"))
        .and(header("Authorization", basic_header("alice", "pw").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"nid": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/node/1"))
        .and(header("Authorization", basic_header("bob", "s3cret:x").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"nid": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    client.set_basic_credentials("alice", "pw");
    assert!(client.node_get("1", NO_PARAMS).await.success);

    client.set_basic_credentials("bob", "s3cret:x");
    assert!(client.node_get("1", NO_PARAMS).await.success);
}

#[tokio::test]
async fn test_unsigned_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/node/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.node_get("1", NO_PARAMS).await.success);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert!(!requests[0].headers.contains_key("x-csrf-token"));
}

// ============================================================================
// Login Flow
// ============================================================================

#[tokio::test]
async fn test_login_then_signed_write() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    mount_token(&server, "tok123").await;

    Mock::given(method("POST"))
        .and(path("/entity/node"))
        .and(header("X-CSRF-Token", "tok123"))
        .and(header("Cookie", "SESSabc=session-id"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "nid": [{"value": 9}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.session().auth_state(), AuthState::Anonymous);

    let outcome = client.login("alice", "pw").await;
    assert!(outcome.success, "login failed: {:?}", outcome.error);
    assert_eq!(client.session().csrf_token().as_deref(), Some("tok123"));
    assert!(client.session().is_signing_csrf());
    assert_eq!(client.session().auth_state(), AuthState::Authenticated);

    let created = client
        .node_post(Some(&serde_json::json!({"title": [{"value": "Hello"}]})))
        .await;
    assert!(created.success);
    assert_eq!(created.json.unwrap()["nid"][0]["value"], 9);
}

#[tokio::test]
async fn test_rejected_login_makes_no_token_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/session/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.login("alice", "bad").await;

    assert!(!outcome.success);
    assert_eq!(outcome.status(), Some(400));
    let err = outcome.error.unwrap();
    assert!(err.auth_error().is_some_and(|e| e.is_login_failure()));
    assert_eq!(client.session().auth_state(), AuthState::Anonymous);
}

#[tokio::test]
async fn test_token_failure_after_login_is_auth_error() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/session/token"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.login("alice", "pw").await;

    assert!(!outcome.success);
    let err = outcome.error.unwrap();
    assert!(err.auth_error().is_some_and(|e| e.is_csrf_failure()));
    assert!(err.is_transport());
    assert!(!client.session().is_signing_csrf());
}

#[tokio::test]
async fn test_logout_keeps_token_signing() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    mount_token(&server, "tok123").await;

    Mock::given(method("GET"))
        .and(path("/user/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/node/3"))
        .and(header("X-CSRF-Token", "tok123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.login("alice", "pw").await.success);
    assert!(client.logout().await.success);

    assert!(client.session().is_signing_csrf());
    assert!(client.node_delete("3", NO_PARAMS).await.success);
}

// ============================================================================
// Shared Sessions
// ============================================================================

#[tokio::test]
async fn test_clones_share_session() {
    let server = MockServer::start().await;
    mount_token(&server, "shared").await;

    let client = client_for(&server);
    let other = client.clone();

    assert!(client.fetch_csrf_token().await.success);
    assert_eq!(other.session().csrf_token().as_deref(), Some("shared"));
}

#[tokio::test]
async fn test_independent_sessions_do_not_interfere() {
    let server = MockServer::start().await;
    mount_token(&server, "only-a").await;

    let config = ClientConfig::builder().with_tracing(false).build();
    let a = WaterwheelClient::from_session(SessionState::new(server.uri()), config.clone()).unwrap();
    let b = WaterwheelClient::from_session(SessionState::new(server.uri()), config).unwrap();

    assert!(a.fetch_csrf_token().await.success);
    assert!(a.session().is_signing_csrf());
    assert!(!b.session().is_signing_csrf());
}

#[tokio::test]
async fn test_requests_during_login_see_old_or_new_token() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/session/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("old-token"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/session/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("new-token")
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/node/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.fetch_csrf_token().await.success);
    assert_eq!(client.session().csrf_token().as_deref(), Some("old-token"));

    let login = {
        let client = client.clone();
        tokio::spawn(async move { client.login("alice", "pw").await.success })
    };
    let readers: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(i * 10)).await;
                client.node_get("1", NO_PARAMS).await.success
            })
        })
        .collect();

    assert!(login.await.unwrap());
    for reader in readers {
        assert!(reader.await.unwrap());
    }
    assert_eq!(client.session().csrf_token().as_deref(), Some("new-token"));

    let requests = server.received_requests().await.unwrap();
    let seen: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/node/1")
        .map(|r| {
            r.headers
                .get("x-csrf-token")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .collect();

    assert_eq!(seen.len(), 16);
    for token in &seen {
        assert!(
            matches!(token.as_deref(), Some("old-token") | Some("new-token")),
            "request signed with {token:?}"
        );
    }
}
