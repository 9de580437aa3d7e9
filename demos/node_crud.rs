//! Node CRUD against a Drupal site
//!
//! This demo walks through both authentication modes:
//! 1. HTTP Basic Auth on every request
//! 2. Cookie session login with a CSRF token
//!
//! and creates, reads, updates, then deletes an article.
//!
//! Required environment variables:
//! - WATERWHEEL_BASE_URL (or DRUPAL_URL)
//! - WATERWHEEL_USERNAME / WATERWHEEL_PASSWORD
//!
//! Run with: cargo run --example node_crud

use serde::{Deserialize, Serialize};
use waterwheel::{ClientConfig, SessionState, WaterwheelClient, NO_PARAMS};

/// A single-valued Drupal field: `[{"value": ...}]`.
#[derive(Debug, Serialize, Deserialize)]
struct FieldValue<T> {
    value: T,
}

/// Entity reference field: `[{"target_id": ...}]`.
#[derive(Debug, Serialize, Deserialize)]
struct TargetId {
    target_id: String,
}

/// Article node, typed.
#[derive(Debug, Serialize, Deserialize)]
struct Article {
    #[serde(rename = "type")]
    bundle: Vec<TargetId>,
    title: Vec<FieldValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nid: Option<Vec<FieldValue<u64>>>,
}

impl Article {
    fn new(title: &str) -> Self {
        Self {
            bundle: vec![TargetId {
                target_id: "article".to_string(),
            }],
            title: vec![FieldValue {
                value: title.to_string(),
            }],
            nid: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for better logging and debugging
    tracing_subscriber::fmt::init();

    println!("=== Drupal Node CRUD ===\n");

    let session = SessionState::from_env()?;
    let client = WaterwheelClient::from_session(session, ClientConfig::default())?;

    example_session_login(&client).await?;

    let nid = example_create(&client).await?;
    example_read(&client, &nid).await?;
    example_update(&client, &nid).await?;
    example_delete(&client, &nid).await?;

    println!("\n✓ All node examples completed successfully!");

    Ok(())
}

/// Example 1: Cookie session login
///
/// Basic credentials are already attached from the environment; logging in
/// additionally fetches the CSRF token that writes need.
async fn example_session_login(client: &WaterwheelClient) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 1: Session Login");
    println!("------------------------");

    let username = std::env::var("WATERWHEEL_USERNAME")?;
    let password = std::env::var("WATERWHEEL_PASSWORD")?;

    let outcome = client.login(&username, &password).await;
    if outcome.success {
        println!("✓ Logged in, auth state: {:?}", client.session().auth_state());
    } else if let Some(err) = outcome.error {
        println!("✗ Login failed: {}", err);
        println!("  Falling back to Basic Auth only");
        client.fetch_csrf_token().await.into_result()?;
    }

    println!();
    Ok(())
}

/// Example 2: Create a typed article
async fn example_create(client: &WaterwheelClient) -> Result<String, Box<dyn std::error::Error>> {
    println!("Example 2: Create");
    println!("-----------------");

    let created = client
        .node_post(Some(&Article::new("Hello from waterwheel")))
        .await
        .into_result()?
        .ok_or("create returned no body")?;

    let article: Article = serde_json::from_value(created)?;
    let nid = article
        .nid
        .and_then(|nid| nid.into_iter().next())
        .map(|field| field.value.to_string())
        .ok_or("created node has no nid")?;

    println!("✓ Created node {}", nid);
    println!();

    Ok(nid)
}

/// Example 3: Read as dynamic JSON
async fn example_read(client: &WaterwheelClient, nid: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 3: Read");
    println!("---------------");

    let outcome = client.node_get(nid, NO_PARAMS).await;
    match outcome.json {
        Some(node) => println!("✓ Title: {}", node["title"][0]["value"]),
        None => println!("✗ Read failed: {:?}", outcome.error),
    }

    println!();
    Ok(())
}

/// Example 4: Update the title
async fn example_update(client: &WaterwheelClient, nid: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 4: Update");
    println!("-----------------");

    client
        .node_patch(nid, Some(&Article::new("Hello again")))
        .await
        .into_result()?;
    println!("✓ Renamed node {}", nid);

    println!();
    Ok(())
}

/// Example 5: Delete
async fn example_delete(client: &WaterwheelClient, nid: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 5: Delete");
    println!("-----------------");

    let outcome = client.node_delete(nid, NO_PARAMS).await;
    println!("✓ Delete returned status {:?}", outcome.status());

    let logout = client.logout().await;
    println!("✓ Logout success: {}", logout.success);

    println!();
    Ok(())
}
