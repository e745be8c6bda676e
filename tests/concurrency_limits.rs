//! Concurrency-budget tests against the public API.

use std::io::Write;

use httptest::{matchers::*, responders::*, Expectation, Server};
use tempfile::NamedTempFile;

use username_status::{SearchConfig, Searcher};

#[tokio::test]
async fn test_global_limit_holds_under_oversubscription() {
    let server = Server::run();
    let platforms: Vec<String> = (0..10).map(|i| format!("p{i}")).collect();
    for p in &platforms {
        server.expect(
            Expectation::matching(request::method_path("GET", format!("/{p}/alice")))
                .respond_with(delay_and_then(
                    std::time::Duration::from_millis(80),
                    status_code(200),
                )),
        );
    }

    let entries: Vec<String> = platforms
        .iter()
        .map(|p| {
            format!(
                r#""{p}": {{"check_uri": "http://{}/{p}/{{username}}", "check_method": "GET",
                    "error_status_codes": [404], "variations": false}}"#,
                server.addr()
            )
        })
        .collect();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{{}}}", entries.join(",")).unwrap();

    let config = SearchConfig {
        catalog: Some(file.path().to_path_buf()),
        global_concurrency: 2,
        per_search_concurrency: 8,
        timeout_seconds: 5,
        retry_attempts: 0,
        ..Default::default()
    };
    let searcher = Searcher::new(config).await.unwrap();
    let report = searcher.search("alice").await.unwrap();

    assert_eq!(report.platforms_checked, 10);
    assert_eq!(report.found_count, 10);
    // Five times more tasks than permits; the in-flight gauge must never
    // have exceeded the global budget
    assert!(
        searcher.stats().peak_in_flight() <= 2,
        "peak in-flight {} exceeded global limit 2",
        searcher.stats().peak_in_flight()
    );
}

#[tokio::test]
async fn test_per_search_limit_is_the_binding_constraint() {
    let server = Server::run();
    let platforms: Vec<String> = (0..8).map(|i| format!("q{i}")).collect();
    for p in &platforms {
        server.expect(
            Expectation::matching(request::method_path("GET", format!("/{p}/bob")))
                .respond_with(delay_and_then(
                    std::time::Duration::from_millis(80),
                    status_code(404),
                )),
        );
    }

    let entries: Vec<String> = platforms
        .iter()
        .map(|p| {
            format!(
                r#""{p}": {{"check_uri": "http://{}/{p}/{{username}}", "check_method": "GET",
                    "error_status_codes": [404], "variations": false}}"#,
                server.addr()
            )
        })
        .collect();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{{}}}", entries.join(",")).unwrap();

    let config = SearchConfig {
        catalog: Some(file.path().to_path_buf()),
        global_concurrency: 16,
        per_search_concurrency: 3,
        timeout_seconds: 5,
        retry_attempts: 0,
        ..Default::default()
    };
    let searcher = Searcher::new(config).await.unwrap();
    let report = searcher.search("bob").await.unwrap();

    assert_eq!(report.platforms_checked, 8);
    assert!(searcher.stats().peak_in_flight() <= 3);
}
