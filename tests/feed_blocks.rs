//! Integration tests for the headline and Q&A feed blocks.

use daily_digest::api::ApiClient;
use daily_digest::blocks::feeds;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> ApiClient {
    ApiClient::new(None).expect("failed to build test ApiClient")
}

/// Three stories, the second of which has no link.
const HN_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>Hacker News</title>
  <link>https://news.ycombinator.com/</link>
  <description>Links for the intellectually curious, ranked by readers.</description>
  <item>
    <title>Show HN: A tiny borrow checker</title>
    <link>https://example.com/borrow</link>
    <comments>https://news.ycombinator.com/item?id=1</comments>
  </item>
  <item>
    <title>Ask HN: Where did the link go?</title>
    <comments>https://news.ycombinator.com/item?id=2</comments>
  </item>
  <item>
    <title>Async Rust in practice</title>
    <link>https://example.com/async</link>
  </item>
</channel></rss>"#;

const QA_ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="text">Newest questions tagged rust or tokio</title>
  <id>https://stackoverflow.com/feeds/tag?tagnames=rust+or+tokio</id>
  <updated>2025-05-06T10:00:00Z</updated>
  <entry>
    <id>https://stackoverflow.com/q/10</id>
    <title type="text">Why does my future not implement Send?</title>
    <link rel="alternate" href="https://stackoverflow.com/questions/10/send" />
    <updated>2025-05-06T09:59:00Z</updated>
  </entry>
</feed>"#;

#[tokio::test]
async fn headlines_block_pairs_titles_and_links_per_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(HN_RSS),
        )
        .mount(&server)
        .await;

    let api = client();
    let url = format!("{}/rss", server.uri());
    let block = feeds::headlines_block(&api, &url, "HN", 5).await;

    assert_eq!(
        block.render(),
        "### 📰 Today’s Headlines (HN)\n\
         - [Show HN: A tiny borrow checker](https://example.com/borrow)\n\
         - [Async Rust in practice](https://example.com/async)"
    );
}

#[tokio::test]
async fn headlines_block_degrades_on_non_feed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>maintenance</body></html>"))
        .mount(&server)
        .await;

    let api = client();
    let url = format!("{}/rss", server.uri());
    let block = feeds::headlines_block(&api, &url, "HN", 5).await;

    assert!(block.is_degraded());
    assert_eq!(block.render(), "### 📰 Today’s Headlines (HN)\n_Failed to fetch._");
}

#[tokio::test]
async fn headlines_block_degrades_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = client();
    let url = format!("{}/rss", server.uri());
    assert!(feeds::headlines_block(&api, &url, "HN", 5).await.is_degraded());
}

#[tokio::test]
async fn qa_block_requests_tag_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/tag"))
        .and(query_param("tagnames", "rust or tokio"))
        .and(query_param("sort", "newest"))
        .respond_with(ResponseTemplate::new(200).set_body_string(QA_ATOM))
        .expect(1)
        .mount(&server)
        .await;

    let api = client();
    let tags = vec!["rust".to_string(), "tokio".to_string()];
    let block = feeds::qa_block(&api, &server.uri(), &tags, 5).await;

    assert_eq!(
        block.render(),
        "### 💬 Q&A (rust, tokio)\n- [Why does my future not implement Send?](https://stackoverflow.com/questions/10/send)"
    );
}

#[tokio::test]
async fn qa_block_without_tags_degrades() {
    let server = MockServer::start().await;
    let api = client();
    let block = feeds::qa_block(&api, &server.uri(), &[], 5).await;
    assert!(block.is_degraded());
}
