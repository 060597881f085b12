//! Mock HTTP server setup for integration tests

use enreachvoice::{EnreachClient, PollPolicy};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::time::Duration;

pub const USERNAME: &str = "test@example.com";
pub const SECRET_KEY: &str = "test-key";

/// Test fixture that owns a mockito server standing in for the REST API.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Mock `GET /users/me` for the default test user.
    pub async fn mock_me(&mut self) -> Mock {
        self.server
            .mock("GET", "/users/me")
            .match_header("authorization", Matcher::Regex("^Basic ".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Id":"test-user-id","Email":"test@example.com"}"#)
            .create_async()
            .await
    }

    /// Build a client pointed straight at the mock server (no discovery).
    pub async fn client(&mut self) -> EnreachClient {
        self.mock_me().await;
        EnreachClient::builder()
            .username(USERNAME)
            .secret_key(SECRET_KEY)
            .use_keyring(false)
            .api_endpoint(self.base_url.clone())
            .transcript_poll_policy(PollPolicy::new(3, Duration::from_millis(1)))
            .build()
            .await
            .expect("client should build against mock server")
    }

    /// Mock a JSON response for `method path`, ignoring the query string.
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
