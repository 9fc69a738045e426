//! Per-test HTTP stub server and a client pointed at it.

use wiremock::MockServer;

use crate::{ClientConfig, GitLabClient};

pub(crate) const TEST_TOKEN: &str = "glpat-test-token";

/// Starts a fresh mock server and returns it with an authenticated client.
///
/// Mocks registered with `.expect(n)` are verified when the server is dropped at the end
/// of the test.
pub(crate) async fn setup() -> (MockServer, GitLabClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(server.uri()).with_token(TEST_TOKEN);
    let client = GitLabClient::new(&config).expect("Failed to create test client");
    (server, client)
}

/// The JSON the label endpoints return for the `kind/bug` fixture label.
pub(crate) const BUG_LABEL_JSON: &str = r##"{  "id" : 5, "name" : "kind/bug", "color" : "#d9534f", "description": "Bug reported by user", "open_issues_count": 1, "closed_issues_count": 0, "open_merge_requests_count": 1, "subscribed": true,"priority": null}"##;

pub(crate) fn bug_label() -> crate::Label {
    crate::Label {
        id: 5,
        name: "kind/bug".to_string(),
        color: "#d9534f".to_string(),
        description: Some("Bug reported by user".to_string()),
        open_issues_count: 1,
        closed_issues_count: 0,
        open_merge_requests_count: 1,
        subscribed: true,
        ..Default::default()
    }
}
