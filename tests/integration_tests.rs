//! Integration tests for arXiv Digest
//!
//! These tests drive the digest and the tool registry end to end, against
//! mock sources and against a local HTTP server standing in for arXiv.

use arxiv_digest::config::{Config, FeedEndpoints, HttpConfig, SessionConfig};
use arxiv_digest::digest::DigestError;
use arxiv_digest::mcp::server::McpServer;
use arxiv_digest::mcp::ToolRegistry;
use arxiv_digest::models::{FeedMode, PaperRecord, RawEntry};
use arxiv_digest::sources::mock::rss_entry;
use arxiv_digest::sources::{FetchError, MockSource};
use arxiv_digest::{ArxivDigest, DigestTools};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

fn rss_item(title: &str, announce_type: &str, id: &str) -> String {
    format!(
        r#"<item>
      <title>{title}</title>
      <link>https://arxiv.org/abs/{id}</link>
      <description>arXiv:{id}v1 Announce Type: {announce_type}
Abstract: About {title}.</description>
      <guid isPermaLink="false">oai:arXiv.org:{id}v1</guid>
      <pubDate>Tue, 16 Jan 2024 00:00:00 -0500</pubDate>
      <arxiv:announce_type>{announce_type}</arxiv:announce_type>
      <dc:creator>Jane Doe, John Roe</dc:creator>
    </item>"#
    )
}

fn rss_feed(category: &str, items: &[String]) -> String {
    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<rss xmlns:arxiv="http://arxiv.org/schemas/atom" xmlns:dc="http://purl.org/dc/elements/1.1/" version="2.0">
  <channel>
    <title>{category} updates on arXiv.org</title>
    <link>http://rss.arxiv.org/rss/{category}</link>
    <description>{category} updates on the arXiv.org e-print archive.</description>
    {}
  </channel>
</rss>"#,
        items.join("\n")
    )
}

fn atom_feed(count: usize) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            let day = 20 - i;
            format!(
                r#"<entry>
    <id>http://arxiv.org/abs/2401.000{i:02}v1</id>
    <updated>2024-01-{day:02}T12:00:00Z</updated>
    <published>2024-01-{day:02}T12:00:00Z</published>
    <title>Paper {i}</title>
    <summary>Abstract {i}</summary>
    <author><name>Author {i}</name></author>
  </entry>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>arXiv Query Results</title>
  <id>http://arxiv.org/api/query</id>
  <updated>2024-01-21T00:00:00Z</updated>
  {}
</feed>"#,
        entries.join("\n")
    )
}

fn digest_against(server: &mockito::ServerGuard) -> ArxivDigest {
    let config = Config {
        feeds: FeedEndpoints {
            api_url: format!("{}/api/query", server.url()),
            rss_url: format!("{}/rss", server.url()),
        },
        http: HttpConfig {
            timeout_secs: 5,
            ..Default::default()
        },
        ..Default::default()
    };
    ArxivDigest::from_config(&config).unwrap()
}

fn titles(records: &[PaperRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title()).collect()
}

/// Replacements are dropped, new submissions kept
#[tokio::test]
async fn test_scenario_a_replacement_excluded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rss/cs.AI")
        .with_status(200)
        .with_header("content-type", "application/rss+xml")
        .with_body(rss_feed(
            "cs.AI",
            &[
                rss_item("Revised Planning Paper", "replace", "2312.00001"),
                rss_item("Fresh Planning Paper", "new", "2401.00001"),
            ],
        ))
        .expect(1)
        .create_async()
        .await;

    let records = digest_against(&server)
        .fetch_current_arxiv_postings_rss("cs.AI", &SessionConfig::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(titles(&records), vec!["Fresh Planning Paper"]);
    assert_eq!(records[0].url(), "https://arxiv.org/abs/2401.00001");
    assert_eq!(records[0].authors(), ["Jane Doe, John Roe"]);
    assert_eq!(
        records[0].published(),
        Some("Tue, 16 Jan 2024 00:00:00 -0500")
    );
}

/// Keyword search keeps only matching titles
#[tokio::test]
async fn test_scenario_b_keyword_filter() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rss/cs.LG")
        .with_status(200)
        .with_body(rss_feed(
            "cs.LG",
            &[
                rss_item("A Transformer Model", "new", "2401.00010"),
                rss_item("Graph Networks", "new", "2401.00011"),
            ],
        ))
        .create_async()
        .await;

    let records = digest_against(&server)
        .keyword_search_arxiv_rss("cs.LG", "transformer", &SessionConfig::default())
        .await
        .unwrap();

    assert_eq!(titles(&records), vec!["A Transformer Model"]);
}

/// Cross-listings survive, order follows the feed, RSS is never capped
#[tokio::test]
async fn test_rss_cross_listings_and_order() {
    let mut server = mockito::Server::new_async().await;
    let items: Vec<String> = (0..8)
        .map(|i| {
            let tag = if i % 3 == 2 { "replace-cross" } else if i % 2 == 0 { "new" } else { "cross" };
            rss_item(&format!("Posting {}", i), tag, &format!("2401.001{:02}", i))
        })
        .collect();
    let _mock = server
        .mock("GET", "/rss/math.CO")
        .with_status(200)
        .with_body(rss_feed("math.CO", &items))
        .create_async()
        .await;

    let session = SessionConfig {
        num_papers: 2,
        ..Default::default()
    };
    let records = digest_against(&server)
        .fetch_current_arxiv_postings_rss("math.CO", &session)
        .await
        .unwrap();

    assert_eq!(
        titles(&records),
        vec!["Posting 0", "Posting 1", "Posting 3", "Posting 4", "Posting 6", "Posting 7"]
    );
}

/// hello honours pirate mode
#[tokio::test]
async fn test_scenario_c_hello() {
    let registry = ToolRegistry::from_digest(Arc::new(ArxivDigest::new(
        Arc::new(MockSource::new(FeedMode::Api)),
        Arc::new(MockSource::new(FeedMode::Rss)),
    )));

    let pirate = SessionConfig {
        pirate_mode: true,
        ..Default::default()
    };
    let plain = SessionConfig::default();

    assert_eq!(
        registry
            .execute("hello", json!({"name": "Alice"}), &pirate)
            .await
            .unwrap(),
        json!("Ahoy, Alice!")
    );
    assert_eq!(
        registry
            .execute("hello", json!({"name": "Alice"}), &plain)
            .await
            .unwrap(),
        json!("Hello, Alice!")
    );
}

/// The API search honours num_papers and keeps newest-first order
#[tokio::test]
async fn test_scenario_d_api_result_count() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search_query".into(), "cat:cs.AI".into()),
            Matcher::UrlEncoded("max_results".into(), "3".into()),
            Matcher::UrlEncoded("sortBy".into(), "submittedDate".into()),
            Matcher::UrlEncoded("sortOrder".into(), "descending".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/atom+xml")
        .with_body(atom_feed(3))
        .expect(1)
        .create_async()
        .await;

    let session = SessionConfig {
        num_papers: 3,
        ..Default::default()
    };
    let records = digest_against(&server)
        .search_arxiv("cs.AI", &session)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(titles(&records), vec!["Paper 0", "Paper 1", "Paper 2"]);
    assert_eq!(records[0].authors(), ["Author 0"]);
    assert_eq!(records[0].url(), "http://arxiv.org/abs/2401.00000v1");
    assert_eq!(records[0].published(), Some("2024-01-20 12:00:00+00:00"));
}

/// A server that ignores max_results still yields at most num_papers records
#[tokio::test]
async fn test_api_results_truncated() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(atom_feed(5))
        .create_async()
        .await;

    let session = SessionConfig {
        num_papers: 3,
        ..Default::default()
    };
    let records = digest_against(&server)
        .search_arxiv("cs.AI", &session)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
}

/// Identical calls against the same snapshot give identical results
#[tokio::test]
async fn test_search_is_deterministic() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(atom_feed(4))
        .expect(2)
        .create_async()
        .await;

    let digest = digest_against(&server);
    let session = SessionConfig::default();

    let first = digest.search_arxiv("cs.AI", &session).await.unwrap();
    let second = digest.search_arxiv("cs.AI", &session).await.unwrap();

    assert_eq!(first, second);
}

/// Transport failures fail the whole call
#[tokio::test]
async fn test_http_error_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rss/cs.AI")
        .with_status(500)
        .create_async()
        .await;

    let result = digest_against(&server)
        .fetch_current_arxiv_postings_rss("cs.AI", &SessionConfig::default())
        .await;

    assert!(matches!(result, Err(DigestError::Fetch(FetchError::Api(_)))));
}

/// Unparseable payloads fail the whole call with no partial results
#[tokio::test]
async fn test_unparseable_feed_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/rss/cs.AI")
        .with_status(200)
        .with_body("<rss><channel><item><title>Cut off")
        .create_async()
        .await;

    let registry = ToolRegistry::from_digest(Arc::new(digest_against(&server)));
    let result = registry
        .execute(
            "fetch_current_arxiv_postings_rss",
            json!({"category": "cs.AI"}),
            &SessionConfig::default(),
        )
        .await;

    assert_err!(result);
}

/// Entries with no announcement type are skipped, the rest still returned
#[tokio::test]
async fn test_untagged_entries_skipped() {
    let rss = MockSource::with_entries(
        FeedMode::Rss,
        vec![
            RawEntry::titled("Untagged").link("https://arxiv.org/abs/2401.09999"),
            rss_entry("Tagged", "new"),
        ],
    );
    let digest = ArxivDigest::new(Arc::new(MockSource::new(FeedMode::Api)), Arc::new(rss));

    let records = digest
        .fetch_current_arxiv_postings_rss("cs.AI", &SessionConfig::default())
        .await
        .unwrap();

    assert_eq!(titles(&records), vec!["Tagged"]);
}

/// The registry exposes exactly the four tools and returns the record shape
#[tokio::test]
async fn test_tool_registry_shape() {
    let rss = MockSource::with_entries(
        FeedMode::Rss,
        vec![rss_entry("A Transformer Model", "new").summary("Attention.")],
    );
    let registry = ToolRegistry::from_digest(Arc::new(ArxivDigest::new(
        Arc::new(MockSource::new(FeedMode::Api)),
        Arc::new(rss),
    )));

    let mut names: Vec<&str> = registry.all().iter().map(|t| t.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "fetch_current_arxiv_postings_rss",
            "hello",
            "keyword_search_arxiv_rss",
            "search_arxiv"
        ]
    );

    let value = registry
        .execute(
            "keyword_search_arxiv_rss",
            json!({"category": "cs.LG", "keyword": "ATTENTION"}),
            &SessionConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        value,
        json!([{
            "title": "A Transformer Model",
            "authors": [],
            "summary": "Attention.",
            "url": "https://arxiv.org/abs/a-transformer-model",
            "published": null
        }])
    );

    let missing = registry
        .execute("no_such_tool", json!({}), &SessionConfig::default())
        .await;
    assert_err!(missing);
}

/// The server can be created successfully
#[tokio::test]
async fn test_server_initialization() {
    let digest = Arc::new(ArxivDigest::new(
        Arc::new(MockSource::new(FeedMode::Api)),
        Arc::new(MockSource::new(FeedMode::Rss)),
    ));
    assert_ok!(McpServer::new(digest, SessionConfig::default()));
}
