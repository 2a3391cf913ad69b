//! Report pipeline: run every block producer in order.

use crate::api::ApiClient;
use crate::blocks::market::CryptoQuote;
use crate::blocks::{LANGUAGE_LIMIT, LIST_LIMIT, feeds, github, market, prompt, weather};
use crate::cli::ReportArgs;
use crate::models::Block;
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

/// Produce every block, one upstream at a time, in report order.
///
/// `now` anchors the activity window so a run sees one consistent instant.
#[instrument(level = "info", skip_all, fields(owner = %args.owner))]
pub async fn collect_blocks(api: &ApiClient, args: &ReportArgs, now: DateTime<Utc>) -> Vec<Block> {
    let gh = github::GitHubSource::new(api, &args.github_api_url, &args.owner);
    let crypto = CryptoQuote {
        id: &args.crypto_id,
        symbol: &args.crypto_symbol,
        vs: &args.crypto_vs,
    };

    let blocks = vec![
        github::languages_block(&gh, LANGUAGE_LIMIT).await,
        github::top_starred_block(&gh, LIST_LIMIT).await,
        github::recent_repos_block(&gh, LIST_LIMIT).await,
        github::activity_block(&gh, now, args.activity_days, LIST_LIMIT).await,
        github::help_wanted_block(&gh, &args.help_wanted_label, LIST_LIMIT).await,
        feeds::headlines_block(api, &args.news_feed_url, &args.news_feed_name, LIST_LIMIT).await,
        feeds::qa_block(api, &args.qa_feed_base, &args.qa_tags, LIST_LIMIT).await,
        market::market_block(api, &args.fx_api_url, &args.fx_pairs, &args.crypto_api_url, &crypto).await,
        weather::weather_block(api, &args.weather_api_url, args.weather_lat, args.weather_lon).await,
        prompt::til_block(),
    ];

    let degraded = blocks.iter().filter(|b| b.is_degraded()).count();
    info!(blocks = blocks.len(), degraded, "Collected report blocks");
    blocks
}
