//! Tests against a real Drupal site.
//!
//! Requires REST resources for `node` enabled with cookie and basic_auth
//! providers, plus an account allowed to create and delete articles.

use waterwheel::{ClientConfig, SessionState, WaterwheelClient, NO_PARAMS};

fn live_client() -> WaterwheelClient {
    let session = SessionState::from_env().unwrap_or_else(|err| {
        panic!(
            "\n\nLive tests need WATERWHEEL_BASE_URL (or DRUPAL_URL) plus \
             WATERWHEEL_USERNAME/WATERWHEEL_PASSWORD.\nError: {err}\n\n"
        )
    });
    WaterwheelClient::from_session(session, ClientConfig::default())
        .expect("Failed to create client")
}

fn credentials() -> (String, String) {
    let username = std::env::var("WATERWHEEL_USERNAME")
        .or_else(|_| std::env::var("DRUPAL_USERNAME"))
        .expect("WATERWHEEL_USERNAME must be set");
    let password = std::env::var("WATERWHEEL_PASSWORD")
        .or_else(|_| std::env::var("DRUPAL_PASSWORD"))
        .expect("WATERWHEEL_PASSWORD must be set");
    (username, password)
}

#[tokio::test]
#[ignore]
async fn test_live_login_and_logout() {
    let client = live_client();
    let (username, password) = credentials();

    let outcome = client.login(&username, &password).await;
    assert!(outcome.success, "Login should succeed: {:?}", outcome.error);
    assert!(client.session().is_signing_csrf());

    let outcome = client.logout().await;
    assert!(outcome.success, "Logout should succeed: {:?}", outcome.error);
}

#[tokio::test]
#[ignore]
async fn test_live_node_crud_with_basic_auth() {
    let client = live_client();
    assert!(
        client.session().is_signing_basic(),
        "Basic credentials should load from the environment"
    );
    client
        .fetch_csrf_token()
        .await
        .into_result()
        .expect("CSRF token fetch should succeed");

    let created = client
        .node_post(Some(&serde_json::json!({
            "type": [{"target_id": "article"}],
            "title": [{"value": "waterwheel live test"}]
        })))
        .await
        .into_result()
        .expect("Create should succeed")
        .expect("Create should return the entity");

    let nid = created["nid"][0]["value"]
        .as_u64()
        .expect("Created node should carry a nid")
        .to_string();

    let updated = client
        .node_patch(
            &nid,
            Some(&serde_json::json!({
                "type": [{"target_id": "article"}],
                "title": [{"value": "waterwheel live test (edited)"}]
            })),
        )
        .await;
    assert!(updated.success, "Update should succeed: {:?}", updated.error);

    let loaded = client
        .node_get(&nid, NO_PARAMS)
        .await
        .into_result()
        .expect("Get should succeed")
        .expect("Get should return the entity");
    assert_eq!(loaded["title"][0]["value"], "waterwheel live test (edited)");

    let deleted = client.node_delete(&nid, NO_PARAMS).await;
    assert!(deleted.success, "Delete should succeed: {:?}", deleted.error);
}
