//! Configuration for the report builder and the heartbeat updater.
//!
//! Both binaries are meant to run unattended (e.g. from a scheduled workflow)
//! with no arguments, so every option has a default and can be supplied via an
//! environment variable. Long flags exist for local runs and override the
//! environment.

use crate::models::CurrencyPair;
use clap::Parser;
use std::path::PathBuf;

/// Settings for the report builder, resolved once at start-up.
///
/// # Examples
///
/// ```sh
/// # Typical scheduled run; owner and token come from the workflow environment
/// GITHUB_REPOSITORY_OWNER=octocat GH_TOKEN=... daily_digest
///
/// # Local run against a scratch file with different market pairs
/// daily_digest --owner octocat --readme-path /tmp/README.md --fx-pairs EUR/GBP,EUR/CHF
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Splice a daily digest into a README section")]
pub struct ReportArgs {
    /// Account whose repositories and public events are reported
    #[arg(long, env = "GITHUB_REPOSITORY_OWNER", default_value = "")]
    pub owner: String,

    /// Full `owner/name` of the repository; heading of a freshly created README
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "")]
    pub repository: String,

    /// GitHub token (preferred over `GITHUB_TOKEN`)
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub gh_token: Option<String>,

    /// GitHub token used when `GH_TOKEN` is absent
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Document that receives the delimited daily section
    #[arg(long, env = "README_PATH", default_value = "README.md")]
    pub readme_path: PathBuf,

    /// Trailing window of the recent-activity block, in days
    #[arg(long, env = "ACTIVITY_DAYS", default_value_t = 7)]
    pub activity_days: u32,

    /// Issue label searched by the help-wanted block
    #[arg(long, env = "HELP_WANTED_LABEL", default_value = "help wanted")]
    pub help_wanted_label: String,

    /// RSS or Atom feed used for headlines
    #[arg(long, env = "NEWS_FEED_URL", default_value = "https://news.ycombinator.com/rss")]
    pub news_feed_url: String,

    /// Display name of the headline feed
    #[arg(long, env = "NEWS_FEED_NAME", default_value = "HN")]
    pub news_feed_name: String,

    /// Base URL of the Q&A site serving tag feeds
    #[arg(long, env = "QA_FEED_BASE", default_value = "https://stackoverflow.com")]
    pub qa_feed_base: String,

    /// Comma-separated tags followed by the Q&A block
    #[arg(long, env = "QA_TAGS", value_delimiter = ',', default_values = ["rust"])]
    pub qa_tags: Vec<String>,

    /// Base URL of the exchange-rate API
    #[arg(long, env = "FX_API_URL", default_value = "https://api.frankfurter.app")]
    pub fx_api_url: String,

    /// Comma-separated `BASE/QUOTE` pairs for the market block
    #[arg(
        long,
        env = "FX_PAIRS",
        value_delimiter = ',',
        default_values = ["USD/EUR", "USD/GBP", "USD/JPY"]
    )]
    pub fx_pairs: Vec<CurrencyPair>,

    /// Base URL of the crypto price API
    #[arg(long, env = "CRYPTO_API_URL", default_value = "https://api.coingecko.com/api/v3")]
    pub crypto_api_url: String,

    /// Coin id as known to the crypto price API
    #[arg(long, env = "CRYPTO_ID", default_value = "bitcoin")]
    pub crypto_id: String,

    /// Ticker shown in the report for the coin
    #[arg(long, env = "CRYPTO_SYMBOL", default_value = "BTC")]
    pub crypto_symbol: String,

    /// Currency the coin is priced in
    #[arg(long, env = "CRYPTO_VS", default_value = "usd")]
    pub crypto_vs: String,

    /// Forecast endpoint
    #[arg(long, env = "WEATHER_API_URL", default_value = "https://api.open-meteo.com/v1/forecast")]
    pub weather_api_url: String,

    /// Latitude of the weather coordinate
    #[arg(long, env = "WEATHER_LAT", default_value_t = 52.52, allow_negative_numbers = true)]
    pub weather_lat: f64,

    /// Longitude of the weather coordinate
    #[arg(long, env = "WEATHER_LON", default_value_t = 13.41, allow_negative_numbers = true)]
    pub weather_lon: f64,
}

impl ReportArgs {
    /// The GitHub token to send, if any. Empty values count as unset, which is
    /// what workflows pass for missing secrets.
    pub fn token(&self) -> Option<String> {
        [&self.gh_token, &self.github_token]
            .into_iter()
            .flatten()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .map(str::to_string)
    }

    /// Heading for a README created from scratch.
    pub fn document_title(&self) -> &str {
        if self.repository.is_empty() {
            "Daily Digest"
        } else {
            &self.repository
        }
    }
}

/// Settings for the heartbeat updater.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Rewrite the heartbeat file when its timestamp changes")]
pub struct HeartbeatArgs {
    /// File holding the heartbeat timestamp
    #[arg(long, env = "HEARTBEAT_PATH", default_value = "HEARTBEAT.md")]
    pub heartbeat_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_args_flags_override() {
        let args = ReportArgs::parse_from([
            "daily_digest",
            "--owner",
            "octocat",
            "--readme-path",
            "/tmp/README.md",
            "--activity-days",
            "3",
            "--fx-pairs",
            "eur/gbp,EUR/CHF",
            "--qa-tags",
            "rust,tokio",
            "--weather-lat",
            "-33.87",
        ]);

        assert_eq!(args.owner, "octocat");
        assert_eq!(args.readme_path, PathBuf::from("/tmp/README.md"));
        assert_eq!(args.activity_days, 3);
        assert_eq!(
            args.fx_pairs,
            vec![CurrencyPair::new("EUR", "GBP"), CurrencyPair::new("EUR", "CHF")]
        );
        assert_eq!(args.qa_tags, vec!["rust".to_string(), "tokio".to_string()]);
        assert!((args.weather_lat + 33.87).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_args_rejects_bad_pair() {
        let result = ReportArgs::try_parse_from(["daily_digest", "--fx-pairs", "USDEUR"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_prefers_gh_token_and_skips_empty() {
        let args = ReportArgs::parse_from([
            "daily_digest",
            "--gh-token",
            " ",
            "--github-token",
            "fallback",
        ]);
        assert_eq!(args.token().as_deref(), Some("fallback"));

        let args = ReportArgs::parse_from([
            "daily_digest",
            "--gh-token",
            "primary",
            "--github-token",
            "fallback",
        ]);
        assert_eq!(args.token().as_deref(), Some("primary"));
    }

    #[test]
    fn test_document_title_uses_repository() {
        let args = ReportArgs::parse_from(["daily_digest", "--repository", "octocat/octocat"]);
        assert_eq!(args.document_title(), "octocat/octocat");
    }

    #[test]
    fn test_heartbeat_args_flag() {
        let args = HeartbeatArgs::parse_from(["heartbeat", "--heartbeat-path", "/tmp/HB.md"]);
        assert_eq!(args.heartbeat_path, PathBuf::from("/tmp/HB.md"));
    }
}
