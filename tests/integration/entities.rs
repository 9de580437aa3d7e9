//! Entity CRUD and generic verbs, driven through the facade.

use super::common::client_for;
use waterwheel::client::security::encode_path_segment;
use waterwheel::{EntityType, NO_PARAMS};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize)]
struct FieldValue<T> {
    value: T,
}

#[derive(Debug, Serialize, Deserialize)]
struct Article {
    title: Vec<FieldValue<String>>,
}

// ============================================================================
// Request Construction
// ============================================================================

#[tokio::test]
async fn test_entity_get_path_and_method() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/node/42"))
        .and(query_param("_format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nid": [{"value": 42}]})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .entity_get(EntityType::Node, "42", NO_PARAMS)
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.json.unwrap()["nid"][0]["value"], 42);
}

#[tokio::test]
async fn test_node_post_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entity/node"))
        .and(query_param("_format", "json"))
        .and(body_json(json!({"title": "Hello"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"nid": [{"value": 1}]})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .node_post(Some(&json!({"title": "Hello"})))
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.status(), Some(201));
}

#[tokio::test]
async fn test_get_never_sends_a_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/node/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .node_get("5", Some(&json!({"fields": ["title"]})))
        .await;
    assert!(outcome.success);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[0].url.query(), Some("_format=json"));
}

#[tokio::test]
async fn test_typed_payloads_for_writes() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/node/8"))
        .and(body_json(json!({"title": [{"value": "Renamed"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": [{"value": "Renamed"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let article = Article {
        title: vec![FieldValue {
            value: "Renamed".to_string(),
        }],
    };
    let outcome = client.node_patch("8", Some(&article)).await;
    assert!(outcome.success);

    let echoed: Article = serde_json::from_value(outcome.json.unwrap()).unwrap();
    assert_eq!(echoed.title[0].value, "Renamed");
}

#[tokio::test]
async fn test_comment_crud() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entity/comment"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"cid": [{"value": 4}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comment/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cid": [{"value": 4}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/comment/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let created = client
        .entity_post(
            EntityType::Comment,
            Some(&json!({"subject": [{"value": "First!"}]})),
        )
        .await;
    assert!(created.success);

    let loaded = client.entity_get(EntityType::Comment, "4", NO_PARAMS).await;
    assert!(loaded.success);

    let deleted = client
        .entity_delete(EntityType::Comment, "4", NO_PARAMS)
        .await;
    assert!(deleted.success);
    assert!(deleted.json.is_none());
}

#[tokio::test]
async fn test_generic_verbs_on_custom_resource() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/flag/3"))
        .and(body_json(json!({"flagged": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .post("api/flag/3", Some(&json!({"flagged": true})))
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.json.unwrap()["ok"], true);
}

#[tokio::test]
async fn test_escaped_path_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/node/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let id = encode_path_segment("a b");
    let outcome = client_for(&server).node_get(&id, NO_PARAMS).await;
    assert!(outcome.success);
}

// ============================================================================
// Outcomes
// ============================================================================

#[tokio::test]
async fn test_parse_error_is_distinct_from_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/node/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/node/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let parse = client.node_get("1", NO_PARAMS).await;
    assert!(!parse.success);
    assert!(parse.json.is_none());
    assert!(parse.response.is_some());
    let err = parse.error.unwrap();
    assert!(err.is_parse());
    assert!(!err.is_transport());

    let transport = client.node_get("2", NO_PARAMS).await;
    assert!(!transport.success);
    assert_eq!(transport.status(), Some(503));
    let err = transport.error.unwrap();
    assert!(err.is_transport());
    assert!(!err.is_parse());
}

#[tokio::test]
async fn test_connection_failure_has_no_response() {
    let client = waterwheel::WaterwheelClient::with_config(
        "http://127.0.0.1:9",
        waterwheel::ClientConfig::builder().with_tracing(false).build(),
    )
    .unwrap();

    let outcome = client.node_get("1", NO_PARAMS).await;

    assert!(!outcome.success);
    assert!(outcome.response.is_none());
    assert!(outcome.error.unwrap().is_transport());
}

#[tokio::test]
async fn test_into_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/node/6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nid": [{"value": 6}]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/node/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let found = client.node_get("6", NO_PARAMS).await.into_result().unwrap();
    assert_eq!(found.unwrap()["nid"][0]["value"], 6);

    let missing = client.node_get("7", NO_PARAMS).await.into_result();
    assert!(missing.is_err());
}
