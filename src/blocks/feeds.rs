//! Text-feed digests: news headlines and the tag-filtered Q&A feed.
//!
//! Feeds are parsed with `feed-rs`, which understands both RSS and Atom, and
//! each rendered line comes from a single entry's own title and link. Entries
//! missing either are skipped, so a feed whose titles and links are out of step
//! can never shift a title onto another entry's link.

use crate::api::{ApiClient, FEED_TIMEOUT};
use crate::models::{Block, FeedEntry};
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, instrument};

/// Parse an RSS or Atom document into title/link pairs, in document order.
///
/// The link is the first `http(s)` link of the entry.
///
/// # Errors
///
/// Returns an error if the payload is not a recognizable feed.
pub fn parse_entries(body: &[u8]) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let feed = feed_rs::parser::parse(body)?;
    let entries: Vec<FeedEntry> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry
                .title
                .map(|t| t.content.split_whitespace().join(" "))
                .filter(|t| !t.is_empty())?;
            let link = entry
                .links
                .into_iter()
                .map(|l| l.href.trim().to_string())
                .find(|href| href.starts_with("http://") || href.starts_with("https://"))?;
            Some(FeedEntry { title, link })
        })
        .collect();
    debug!(count = entries.len(), "Parsed feed entries");
    Ok(entries)
}

/// Render up to `limit` entries as markdown links.
///
/// # Returns
///
/// One `- [title](link)` line per entry, or `_No items._` for an empty feed.
pub fn render_entries(entries: &[FeedEntry], limit: usize) -> String {
    if entries.is_empty() {
        return "_No items._".to_string();
    }
    entries
        .iter()
        .take(limit)
        .map(|e| format!("- [{}]({})", e.title, e.link))
        .join("\n")
}

async fn fetch_digest(api: &ApiClient, url: &str, limit: usize) -> Result<String, Box<dyn Error>> {
    let body = api.get_bytes(url, FEED_TIMEOUT).await?;
    let entries = parse_entries(&body)?;
    Ok(render_entries(&entries, limit))
}

/// Latest headlines from a general news feed.
#[instrument(level = "info", skip(api))]
pub async fn headlines_block(api: &ApiClient, feed_url: &str, feed_name: &str, limit: usize) -> Block {
    let heading = format!("### 📰 Today’s Headlines ({feed_name})");
    Block::from_result(heading, fetch_digest(api, feed_url, limit).await)
}

/// URL of the newest-first feed for questions tagged with any of `tags`.
pub fn qa_feed_url(base: &str, tags: &[String]) -> String {
    let tagnames = tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).join(" or ");
    format!(
        "{}/feeds/tag?tagnames={}&sort=newest",
        base.trim_end_matches('/'),
        urlencoding::encode(&tagnames)
    )
}

/// Newest questions for the followed tags.
#[instrument(level = "info", skip(api))]
pub async fn qa_block(api: &ApiClient, base: &str, tags: &[String], limit: usize) -> Block {
    let heading = format!("### 💬 Q&A ({})", tags.iter().join(", "));
    let result = if tags.iter().all(|t| t.trim().is_empty()) {
        Err("QA_TAGS is empty".into())
    } else {
        fetch_digest(api, &qa_feed_url(base, tags), limit).await
    };
    Block::from_result(heading, result)
}
