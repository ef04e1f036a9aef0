// ---------------------------------------------------------------------------
// SecurityScorecard client tests against a mock API
// ---------------------------------------------------------------------------

use futures::{StreamExt, TryStreamExt};
use kdimap_client::{ClientError, FindingSource, ScorecardClient, ScorecardConfig};
use kdimap_types::{IssueTypeFilter, PortfolioId, RawFinding};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ScorecardClient {
    ScorecardClient::new(ScorecardConfig {
        base_url: server.uri(),
        ..ScorecardConfig::new("test-key")
    })
    .unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", "Token test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn authenticate_succeeds_with_portfolio_listing() {
    let server = MockServer::start().await;
    mount_json(&server, "/portfolios", json!({"entries": [{"id": "p1"}]})).await;

    assert!(client_for(&server).authenticate().await);
}

#[tokio::test]
async fn authenticate_fails_on_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolios"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client_for(&server).authenticate().await);
}

#[tokio::test]
async fn authenticate_fails_without_entries() {
    let server = MockServer::start().await;
    mount_json(&server, "/portfolios", json!({"error": "nope"})).await;

    assert!(!client_for(&server).authenticate().await);
}

#[tokio::test]
async fn default_portfolio_is_first_entry() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/portfolios",
        json!({"entries": [{"id": "first"}, {"id": "second"}]}),
    )
    .await;

    let portfolio = client_for(&server).default_portfolio().await.unwrap();
    assert_eq!(portfolio, PortfolioId::from("first"));
}

#[tokio::test]
async fn default_portfolio_errors_when_empty() {
    let server = MockServer::start().await;
    mount_json(&server, "/portfolios", json!({"entries": []})).await;

    let err = client_for(&server).default_portfolio().await.unwrap_err();
    assert!(matches!(err, ClientError::NoPortfolio));
}

#[tokio::test]
async fn get_issues_walks_companies_then_filtered_types() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/portfolios/p1/companies",
        json!({"entries": [{"domain": "a.com"}, {"domain": "b.com"}]}),
    )
    .await;
    mount_json(
        &server,
        "/companies/a.com/issues/service_imap",
        json!({"entries": [{"id": 1}, {"id": 2}]}),
    )
    .await;
    mount_json(
        &server,
        "/companies/a.com/issues/csp_no_policy",
        json!({"entries": [{"id": 3}]}),
    )
    .await;
    mount_json(
        &server,
        "/companies/b.com/issues/service_imap",
        json!({"entries": []}),
    )
    .await;
    mount_json(
        &server,
        "/companies/b.com/issues/csp_no_policy",
        json!({"entries": [{"id": 4}, "not-an-object"]}),
    )
    .await;

    let client = client_for(&server);
    let portfolio = PortfolioId::from("p1");
    let filter = IssueTypeFilter::parse("service_imap,csp_no_policy");
    let findings: Vec<RawFinding> = client
        .get_issues(&portfolio, Some(&filter))
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<String> = findings.iter().filter_map(|f| f.text("id")).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn get_issues_without_filter_uses_issue_type_metadata() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/portfolios/p1/companies",
        json!({"entries": [{"domain": "a.com"}]}),
    )
    .await;
    mount_json(
        &server,
        "/metadata/issue-types",
        json!({"entries": [{"key": "tlscert_expired"}, {"key": "open_resolver"}]}),
    )
    .await;
    mount_json(
        &server,
        "/companies/a.com/issues/tlscert_expired",
        json!({"entries": [{"type": "tlscert_expired"}]}),
    )
    .await;
    mount_json(
        &server,
        "/companies/a.com/issues/open_resolver",
        json!({"entries": [{"type": "open_resolver"}]}),
    )
    .await;

    let client = client_for(&server);
    let portfolio = PortfolioId::from("p1");
    let findings: Vec<RawFinding> = client
        .get_issues(&portfolio, None)
        .try_collect()
        .await
        .unwrap();

    let types: Vec<String> = findings.iter().filter_map(|f| f.text("type")).collect();
    assert_eq!(types, vec!["tlscert_expired", "open_resolver"]);
}

#[tokio::test]
async fn get_issues_stops_at_first_upstream_error() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/portfolios/p1/companies",
        json!({"entries": [{"domain": "a.com"}, {"domain": "b.com"}]}),
    )
    .await;
    mount_json(
        &server,
        "/companies/a.com/issues/service_imap",
        json!({"entries": [{"id": 1}]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/companies/b.com/issues/service_imap"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let portfolio = PortfolioId::from("p1");
    let filter = IssueTypeFilter::parse("service_imap");
    let mut stream = client.get_issues(&portfolio, Some(&filter));

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.text("id").as_deref(), Some("1"));

    match stream.next().await {
        Some(Err(ClientError::Status { status, endpoint })) => {
            assert_eq!(status, 500);
            assert_eq!(endpoint, "/companies/b.com/issues/service_imap");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolios"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).portfolios().await.unwrap_err();
    assert!(matches!(err, ClientError::Json { .. }), "got {err}");
}
