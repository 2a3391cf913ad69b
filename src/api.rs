//! HTTP access to the upstream APIs and feeds.
//!
//! Every request goes through [`ApiClient`], which owns one `reqwest::Client`
//! and applies a per-call timeout. There is no retry layer: a
//! failing request is reported to the caller, and the block producer turns it
//! into degraded output.
//!
//! # Timeouts
//!
//! | Upstream | Timeout |
//! |----------|---------|
//! | GitHub REST API | [`GITHUB_TIMEOUT`] (30s) |
//! | RSS/Atom feeds, weather | [`FEED_TIMEOUT`] (20s) |
//! | Exchange-rate and crypto lookups | [`MARKET_TIMEOUT`] (15s) |

use crate::utils::truncate_for_log;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

pub const GITHUB_TIMEOUT: Duration = Duration::from_secs(30);
pub const FEED_TIMEOUT: Duration = Duration::from_secs(20);
pub const MARKET_TIMEOUT: Duration = Duration::from_secs(15);

/// GitHub rejects requests without a `User-Agent`.
pub const USER_AGENT: &str = concat!("daily_digest/", env!("CARGO_PKG_VERSION"));

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Shared HTTP client for all block producers.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    /// Optional bearer credential sent to the GitHub API only.
    github_token: Option<String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiClient {
    /// Build a client with the crate's `User-Agent` and an optional GitHub token.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(github_token: Option<String>) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            github_token,
        })
    }

    /// GET a GitHub API URL and decode the JSON body.
    ///
    /// Sends the GitHub `Accept` header and, when configured, the bearer token.
    #[instrument(level = "debug", skip_all, fields(%url))]
    pub async fn github_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Box<dyn Error>> {
        let mut request = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .timeout(GITHUB_TIMEOUT);
        if let Some(token) = &self.github_token {
            request = request.bearer_auth(token);
        }
        let response = self.send(request, url).await?;
        decode_json(response, url).await
    }

    /// GET any URL and decode the JSON body.
    #[instrument(level = "debug", skip_all, fields(%url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, Box<dyn Error>> {
        let request = self.client.get(url).query(query).timeout(timeout);
        let response = self.send(request, url).await?;
        decode_json(response, url).await
    }

    /// GET any URL and return the raw body, e.g. for feed parsing.
    #[instrument(level = "debug", skip_all, fields(%url))]
    pub async fn get_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, Box<dyn Error>> {
        let request = self.client.get(url).timeout(timeout);
        let response = self.send(request, url).await?;
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Read response body");
        Ok(bytes.to_vec())
    }

    /// Send a request, turning transport errors and non-2xx statuses into errors.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, Box<dyn Error>> {
        let t0 = Instant::now();
        let result = request.send().await;
        let elapsed_ms = t0.elapsed().as_millis();

        match result {
            Ok(response) => {
                let status = response.status();
                debug!(%url, %status, elapsed_ms, "HTTP response");
                Ok(response.error_for_status()?)
            }
            Err(e) => {
                warn!(%url, elapsed_ms, error = %e, "HTTP request failed");
                Err(Box::new(e))
            }
        }
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, Box<dyn Error>> {
    let body = response.text().await?;
    match serde_json::from_str::<T>(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(
                %url,
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Upstream returned non-conforming JSON"
            );
            Err(Box::new(e))
        }
    }
}
