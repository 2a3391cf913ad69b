//! Data models for upstream payloads and rendered report blocks.
//!
//! This module defines the structures used throughout the application:
//! - [`Block`] / [`BlockOutcome`]: one independently produced report section
//! - GitHub payloads: [`Repository`], [`Event`], [`Issue`], [`SearchResponse`]
//! - [`FeedEntry`]: a title/link pair taken from a single feed entry
//! - Market payloads: [`CurrencyPair`], [`FxRates`]
//! - Weather payloads: [`Forecast`], [`CurrentWeather`], [`DailyWeather`]
//!
//! Upstream structs only carry the fields the report renders; everything else
//! in the JSON is ignored by serde.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Placeholder line rendered in place of a block (or a single market line)
/// whose upstream could not be fetched.
pub const FAILED_PLACEHOLDER: &str = "_Failed to fetch._";

/// Result of a single fetch-and-format cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    /// Formatted markdown body.
    Ready(String),
    /// The upstream failed; the string carries the reason for the logs.
    Degraded(String),
}

/// One section of the report: a markdown heading plus its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Markdown heading line, e.g. `### 🔧 Recent Repos`.
    pub heading: String,
    /// Body or degradation reason.
    pub outcome: BlockOutcome,
}

impl Block {
    /// A block whose body rendered successfully.
    pub fn ready(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            outcome: BlockOutcome::Ready(body.into()),
        }
    }

    /// A block that renders [`FAILED_PLACEHOLDER`]; `reason` is kept for logs
    /// and tests only.
    pub fn degraded(heading: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            outcome: BlockOutcome::Degraded(reason.into()),
        }
    }

    /// Convert a producer result into a block, degrading on error.
    ///
    /// This is the only place where upstream failures are swallowed; the
    /// error is logged and the block renders [`FAILED_PLACEHOLDER`].
    pub fn from_result(heading: impl Into<String>, result: Result<String, Box<dyn Error>>) -> Self {
        let heading = heading.into();
        match result {
            Ok(body) => Self::ready(heading, body),
            Err(e) => {
                warn!(%heading, error = %e, "Block degraded");
                Self::degraded(heading, e.to_string())
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, BlockOutcome::Degraded(_))
    }

    /// Render the heading followed by the body or the failure placeholder.
    pub fn render(&self) -> String {
        match &self.outcome {
            BlockOutcome::Ready(body) => format!("{}\n{}", self.heading, body),
            BlockOutcome::Degraded(_) => format!("{}\n{}", self.heading, FAILED_PLACEHOLDER),
        }
    }
}

/// A repository as returned by the user listing and the repository search.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    /// `null` for repositories that never received a push.
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub languages_url: String,
}

/// Per-repository language breakdown: language name to byte count.
pub type LanguageBytes = HashMap<String, u64>;

/// A public timeline event.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event kind such as `PushEvent`.
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub repo: EventRepo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    /// `owner/name` of the repository the event happened in.
    pub name: String,
}

/// An issue returned by the issue search.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub title: String,
    pub html_url: String,
    /// API URL of the repository, e.g. `https://api.github.com/repos/owner/name`.
    pub repository_url: String,
}

/// Envelope shared by the repository and issue search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A single entry of an RSS or Atom feed with both a title and a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

/// A `BASE/QUOTE` currency pair such as `USD/EUR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.to_uppercase(),
            quote: quote.to_uppercase(),
        }
    }
}

impl FromStr for CurrencyPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("expected BASE/QUOTE, got {s:?}"))?;
        let (base, quote) = (base.trim(), quote.trim());
        let valid = |code: &str| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphabetic());
        if !valid(base) || !valid(quote) {
            return Err(format!("expected alphabetic currency codes, got {s:?}"));
        }
        Ok(Self::new(base, quote))
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Exchange-rate lookup response; only `rates` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct FxRates {
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

/// Crypto spot-price response: coin id to (vs currency to price).
pub type CryptoPrices = HashMap<String, HashMap<String, f64>>;

/// Forecast response for a single coordinate.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub current_weather: Option<CurrentWeather>,
    pub daily: Option<DailyWeather>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius.
    pub temperature: f64,
    /// km/h.
    pub windspeed: f64,
    /// WMO weather interpretation code.
    pub weathercode: u16,
}

/// Daily aggregates; index 0 is today because the request asks for one day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyWeather {
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}
