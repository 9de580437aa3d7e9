use waterwheel::{ClientConfig, WaterwheelClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A client pointed at the mock server, tracing off.
pub fn client_for(server: &MockServer) -> WaterwheelClient {
    WaterwheelClient::with_config(
        server.uri(),
        ClientConfig::builder().with_tracing(false).build(),
    )
    .expect("client should build")
}

/// Mount a login form handler that accepts any credentials.
pub async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "SESSabc=session-id; path=/; HttpOnly"),
        )
        .mount(server)
        .await;
}

/// Mount a token endpoint returning `token` as plain text.
pub async fn mount_token(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/session/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .set_body_string(token),
        )
        .mount(server)
        .await;
}

/// `Authorization` value for the given Basic credentials.
pub fn basic_header(username: &str, password: &str) -> String {
    use base64::Engine;
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"))
    )
}
