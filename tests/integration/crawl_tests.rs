//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run full
//! crawls end-to-end over real HTTP.

use wavefront::config::{Config, CrawlerConfig, RobotsFallback, UserAgentConfig};
use wavefront::crawler::run_crawl;
use wavefront::state::{CrawlPhase, EndReason, PageOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given limits
fn create_test_config(max_depth: u32, max_pages: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed: None,
            max_depth,
            max_pages,
            request_timeout_secs: 5,
            respect_robots: true,
            robots_fallback: RobotsFallback::Allow,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
    }
}

async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Paths the server saw requests for, in arrival order
async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_breadth_first_with_robots() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nDisallow: /private/").await;

    // Mix of absolute and relative links, a fragment duplicate and a blocked path
    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{}/a">A</a>
            <a href="b">B</a>
            <a href="/a#section">A again</a>
            <a href="/private/secret">Secret</a>
            <a href="mailto:owner@example.com">Mail</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/c">C</a><a href="/">Home</a>"#.to_string()).await;

    // B fails; the crawl must carry on to C
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/c", "<html><body>leaf</body></html>".to_string()).await;

    let seed = url::Url::parse(&format!("{}/", base_url)).expect("Failed to parse seed");
    let report = run_crawl(&create_test_config(3, 100), seed, None)
        .await
        .expect("Crawl failed");

    let visited: Vec<String> = report
        .visits
        .iter()
        .map(|v| v.url.path().to_string())
        .collect();
    assert_eq!(visited, vec!["/", "/a", "/b", "/c"]);

    assert_eq!(report.visits[2].outcome, PageOutcome::HttpError { status: 500 });
    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.robots_denied, 1);
    assert_eq!(report.end_reason, EndReason::FrontierExhausted);
    assert_eq!(report.final_phase, CrawlPhase::Done);

    let requests = requested_paths(&mock_server).await;
    assert!(!requests.iter().any(|p| p.starts_with("/private/")));
    assert_eq!(requests.iter().filter(|p| *p == "/robots.txt").count(), 1);
    assert_eq!(requests.iter().filter(|p| *p == "/a").count(), 1);
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let mock_server = MockServer::start().await;

    let anchors: String = (1..=10)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", anchors).await;
    for i in 1..=10 {
        mount_page(&mock_server, &format!("/p{}", i), String::new()).await;
    }

    let seed = url::Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");
    let report = run_crawl(&create_test_config(2, 4), seed, None)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_visited(), 4);
    assert_eq!(report.end_reason, EndReason::PageBudgetReached);
    assert_eq!(report.unprocessed, 7);

    let page_requests = requested_paths(&mock_server)
        .await
        .into_iter()
        .filter(|p| p != "/robots.txt")
        .count();
    assert_eq!(page_requests, 4);
}

#[tokio::test]
async fn test_robots_server_error_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", r#"<a href="/next">next</a>"#.to_string()).await;
    mount_page(&mock_server, "/next", String::new()).await;

    let seed = url::Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");

    let allowed = run_crawl(&create_test_config(2, 100), seed.clone(), None)
        .await
        .expect("Crawl failed");
    assert_eq!(allowed.pages_visited(), 2);
    assert_eq!(allowed.robots_fallbacks, 1);

    let mut deny = create_test_config(2, 100);
    deny.crawler.robots_fallback = RobotsFallback::Deny;
    let denied = run_crawl(&deny, seed, None).await.expect("Crawl failed");
    assert_eq!(denied.pages_visited(), 0);
    assert_eq!(denied.robots_denied, 1);
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = url::Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");
    let report = run_crawl(&create_test_config(2, 100), seed, None)
        .await
        .expect("Crawl failed");

    assert_eq!(report.succeeded(), 1);
}

#[tokio::test]
async fn test_redirect_target_is_fetched_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/old">Old</a><a href="/new">New</a>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", "<html><body>moved here</body></html>".to_string()).await;

    let seed = url::Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");
    let report = run_crawl(&create_test_config(3, 100), seed, None)
        .await
        .expect("Crawl failed");

    let visited: Vec<String> = report
        .visits
        .iter()
        .map(|v| v.url.path().to_string())
        .collect();
    assert_eq!(visited, vec!["/", "/old"]);
    assert!(report.visits[1].outcome.is_success());

    let requests = requested_paths(&mock_server).await;
    assert_eq!(requests.iter().filter(|p| *p == "/new").count(), 1);
}

#[tokio::test]
async fn test_redirect_into_disallowed_path_is_not_fetched() {
    let mock_server = MockServer::start().await;

    mount_robots(&mock_server, "User-agent: *\nDisallow: /private/").await;
    mount_page(&mock_server, "/", r#"<a href="/go">Go</a>"#.to_string()).await;
    Mock::given(method("GET"))
        .and(path("/go"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/private/secret"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let seed = url::Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");
    let report = run_crawl(&create_test_config(2, 100), seed, None)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_visited(), 2);
    assert_eq!(
        report.visits[1].outcome,
        PageOutcome::Redirected {
            to: "/private/secret".to_string()
        }
    );
    assert_eq!(report.robots_denied, 1);

    let requests = requested_paths(&mock_server).await;
    assert!(!requests.iter().any(|p| p.starts_with("/private/")));
}

#[tokio::test]
async fn test_seed_with_fragment_is_fetched_once() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/">Home</a><a href="/#top">Top</a>"#.to_string()).await;

    let seed = wavefront::config::validate_seed(&format!("{}/#top", mock_server.uri()))
        .expect("Failed to validate seed");
    let report = run_crawl(&create_test_config(2, 100), seed, None)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_visited(), 1);
    let requests = requested_paths(&mock_server).await;
    assert_eq!(requests.iter().filter(|p| *p == "/").count(), 1);
}
