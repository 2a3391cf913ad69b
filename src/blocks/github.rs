//! GitHub-backed blocks: languages, top starred, recent repos, activity and help wanted.
//!
//! All requests go to the REST API rooted at `GITHUB_API_URL` for the account
//! in `GITHUB_REPOSITORY_OWNER`. Each public `*_block` function performs its
//! own fetches and never fails; the `render_*` functions are pure and hold the
//! selection and ordering rules.

use crate::api::ApiClient;
use crate::models::{Block, Event, Issue, LanguageBytes, Repository, SearchResponse};
use crate::utils::{format_utc_minute, format_utc_second};
use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Event kinds shown in the activity block.
pub const ACTIVITY_KINDS: [&str; 6] = [
    "PushEvent",
    "PullRequestEvent",
    "CreateEvent",
    "ReleaseEvent",
    "IssuesEvent",
    "WatchEvent",
];

const LANGUAGES_HEADING: &str = "### 🧪 Languages (approx)";
const TOP_STARRED_HEADING: &str = "### ⭐ Top Starred Repos";
const RECENT_REPOS_HEADING: &str = "### 🔧 Recent Repos";
const HELP_WANTED_HEADING: &str = "### 🙋 Help Wanted";

/// Page size for listings; one page is all the report looks at.
const PAGE_SIZE: &str = "100";
/// Search results requested for the top-starred block before truncation.
const STARRED_PAGE_SIZE: &str = "10";

/// Thin view over the GitHub REST API for one account.
#[derive(Debug, Clone, Copy)]
pub struct GitHubSource<'a> {
    api: &'a ApiClient,
    base_url: &'a str,
    owner: &'a str,
}

impl<'a> GitHubSource<'a> {
    pub fn new(api: &'a ApiClient, base_url: &'a str, owner: &'a str) -> Self {
        Self {
            api,
            base_url,
            owner,
        }
    }

    fn owner(&self) -> Result<&'a str, Box<dyn Error>> {
        let owner = self.owner.trim();
        if owner.is_empty() {
            return Err("GITHUB_REPOSITORY_OWNER is not set".into());
        }
        Ok(owner)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// List the owner's public repositories (first page).
    pub async fn list_repos(&self, sort: Option<&str>) -> Result<Vec<Repository>, Box<dyn Error>> {
        let url = self.url(&format!("/users/{}/repos", self.owner()?));
        let mut query = vec![("per_page", PAGE_SIZE)];
        if let Some(sort) = sort {
            query.push(("sort", sort));
        }
        let repos: Vec<Repository> = self.api.github_json(&url, &query).await?;
        debug!(count = repos.len(), "Listed repositories");
        Ok(repos)
    }

    /// Byte counts per language for one repository.
    pub async fn languages(&self, repo: &Repository) -> Result<LanguageBytes, Box<dyn Error>> {
        if repo.languages_url.is_empty() {
            return Err(format!("repository {} has no languages_url", repo.name).into());
        }
        self.api.github_json(&repo.languages_url, &[]).await
    }

    /// The owner's public event timeline (first page, newest first).
    pub async fn public_events(&self) -> Result<Vec<Event>, Box<dyn Error>> {
        let url = self.url(&format!("/users/{}/events/public", self.owner()?));
        self.api.github_json(&url, &[("per_page", PAGE_SIZE)]).await
    }

    /// Owned, non-fork repositories ordered by total star count.
    pub async fn search_starred(&self) -> Result<Vec<Repository>, Box<dyn Error>> {
        let url = self.url("/search/repositories");
        let q = format!("user:{} fork:false", self.owner()?);
        let response: SearchResponse<Repository> = self
            .api
            .github_json(
                &url,
                &[
                    ("q", q.as_str()),
                    ("sort", "stars"),
                    ("order", "desc"),
                    ("per_page", STARRED_PAGE_SIZE),
                ],
            )
            .await?;
        Ok(response.items)
    }

    /// Open issues carrying `label` in the owner's repositories.
    pub async fn search_issues(&self, label: &str, limit: usize) -> Result<Vec<Issue>, Box<dyn Error>> {
        let url = self.url("/search/issues");
        let q = format!("user:{} label:\"{}\" state:open is:issue", self.owner()?, label);
        let per_page = limit.to_string();
        let response: SearchResponse<Issue> = self
            .api
            .github_json(
                &url,
                &[
                    ("q", q.as_str()),
                    ("sort", "updated"),
                    ("order", "desc"),
                    ("per_page", per_page.as_str()),
                ],
            )
            .await?;
        Ok(response.items)
    }
}

/// Language share across all non-fork repositories.
#[instrument(level = "info", skip_all)]
pub async fn languages_block(github: &GitHubSource<'_>, limit: usize) -> Block {
    Block::from_result(LANGUAGES_HEADING, fetch_languages(github, limit).await)
}

async fn fetch_languages(github: &GitHubSource<'_>, limit: usize) -> Result<String, Box<dyn Error>> {
    let repos = github.list_repos(None).await?;

    // One lookup at a time; a repo whose breakdown fails contributes nothing.
    let breakdowns: Vec<LanguageBytes> = stream::iter(repos.iter().filter(|r| !r.fork))
        .then(|repo| async move {
            match github.languages(repo).await {
                Ok(langs) => langs,
                Err(e) => {
                    warn!(repo = %repo.name, error = %e, "Language lookup failed; skipping repo");
                    LanguageBytes::new()
                }
            }
        })
        .collect()
        .await;

    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for (lang, bytes) in breakdowns.into_iter().flatten() {
        *totals.entry(lang).or_insert(0) += bytes;
    }
    info!(languages = totals.len(), "Aggregated language bytes");
    Ok(render_languages(&totals, limit))
}

/// Render the top `limit` languages as a share of their own subtotal.
///
/// # Arguments
///
/// * `totals` - Bytes per language summed over every counted repository
/// * `limit` - Number of languages to keep
///
/// # Returns
///
/// `- **Lang**: NN.N%` lines, largest first with ties in alphabetical order.
/// `_No data._` when the kept languages add up to zero bytes.
pub fn render_languages(totals: &BTreeMap<String, u64>, limit: usize) -> String {
    let top: Vec<(&String, u64)> = totals
        .iter()
        .map(|(lang, bytes)| (lang, *bytes))
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(limit)
        .collect();

    let subtotal: u64 = top.iter().map(|(_, bytes)| bytes).sum();
    if subtotal == 0 {
        return "_No data._".to_string();
    }
    let denominator = subtotal as f64;

    top.iter()
        .map(|(lang, bytes)| {
            let pct = *bytes as f64 * 100.0 / denominator;
            format!("- **{lang}**: {pct:.1}%")
        })
        .join("\n")
}

/// Most-starred owned repositories.
///
/// This ranks by all-time star count; GitHub offers no per-window star history
/// through the search API.
#[instrument(level = "info", skip_all)]
pub async fn top_starred_block(github: &GitHubSource<'_>, limit: usize) -> Block {
    let result = github
        .search_starred()
        .await
        .map(|repos| render_top_starred(&repos, limit));
    Block::from_result(TOP_STARRED_HEADING, result)
}

/// Search results as links with their star counts, in the order returned.
pub fn render_top_starred(repos: &[Repository], limit: usize) -> String {
    if repos.is_empty() {
        return "_No repos._".to_string();
    }
    repos
        .iter()
        .take(limit)
        .map(|r| format!("- [{}]({}) — ★{}", r.name, r.html_url, r.stargazers_count))
        .join("\n")
}

/// Non-fork repositories ordered by last push.
#[instrument(level = "info", skip_all)]
pub async fn recent_repos_block(github: &GitHubSource<'_>, limit: usize) -> Block {
    let result = github
        .list_repos(Some("updated"))
        .await
        .map(|repos| render_recent_repos(repos, limit));
    Block::from_result(RECENT_REPOS_HEADING, result)
}

/// Render non-fork repositories newest push first.
///
/// # Arguments
///
/// * `repos` - First page of the owner's repository listing
/// * `limit` - Maximum number of repositories to show
///
/// # Returns
///
/// One entry per repository with its star count, last push (or `never`) and
/// description on an indented second line, or `_No public repos found._`.
pub fn render_recent_repos(repos: Vec<Repository>, limit: usize) -> String {
    let lines: Vec<String> = repos
        .into_iter()
        .filter(|r| !r.fork)
        .sorted_by(|a, b| b.pushed_at.cmp(&a.pushed_at))
        .take(limit)
        .map(|r| {
            let pushed = r
                .pushed_at
                .map(format_utc_second)
                .unwrap_or_else(|| "never".to_string());
            format!(
                "- [{}]({}) — ★{} — _last push {}_  \n  {}",
                r.name,
                r.html_url,
                r.stargazers_count,
                pushed,
                r.description.unwrap_or_default()
            )
        })
        .collect();

    if lines.is_empty() {
        "_No public repos found._".to_string()
    } else {
        lines.join("\n")
    }
}

/// Heading of the activity block for a given window.
pub fn activity_heading(days: u32) -> String {
    format!("### ⚡ Recent Activity ({days}d)")
}

/// Allow-listed public events inside the trailing window ending at `now`.
#[instrument(level = "info", skip_all, fields(days = days))]
pub async fn activity_block(
    github: &GitHubSource<'_>,
    now: DateTime<Utc>,
    days: u32,
    limit: usize,
) -> Block {
    let result = github
        .public_events()
        .await
        .map(|events| render_activity(&events, now, days, limit));
    Block::from_result(activity_heading(days), result)
}

/// Keep events newer than `now - days` whose kind is allow-listed, in feed order.
pub fn render_activity(events: &[Event], now: DateTime<Utc>, days: u32, limit: usize) -> String {
    let cutoff = now - Duration::days(i64::from(days));
    let lines: Vec<String> = events
        .iter()
        .filter(|e| e.created_at >= cutoff)
        .filter(|e| ACTIVITY_KINDS.contains(&e.kind.as_str()))
        .take(limit)
        .map(|e| {
            let summary = e.kind.strip_suffix("Event").unwrap_or(&e.kind);
            format!(
                "- {} — **{}** in `{}`",
                format_utc_minute(e.created_at),
                summary,
                e.repo.name
            )
        })
        .collect();

    if !lines.is_empty() {
        lines.join("\n")
    } else if days == 7 {
        "_No public activity in the last week._".to_string()
    } else {
        format!("_No public activity in the last {days} days._")
    }
}

/// Open issues labelled for outside help, in search ranking order.
#[instrument(level = "info", skip_all, fields(%label))]
pub async fn help_wanted_block(github: &GitHubSource<'_>, label: &str, limit: usize) -> Block {
    let result = github
        .search_issues(label, limit)
        .await
        .map(|issues| render_help_wanted(&issues, limit));
    Block::from_result(HELP_WANTED_HEADING, result)
}

/// Issues as links followed by the `owner/name` they belong to.
pub fn render_help_wanted(issues: &[Issue], limit: usize) -> String {
    if issues.is_empty() {
        return "_No open issues._".to_string();
    }
    issues
        .iter()
        .take(limit)
        .map(|i| format!("- [{}]({}) in `{}`", i.title, i.html_url, repo_slug(&i.repository_url)))
        .join("\n")
}

/// `https://api.github.com/repos/owner/name` → `owner/name`.
fn repo_slug(repository_url: &str) -> String {
    Url::parse(repository_url)
        .ok()
        .and_then(|u| {
            let segments: Vec<String> = u.path_segments()?.map(str::to_string).collect();
            match segments.as_slice() {
                [.., owner, name] if !owner.is_empty() && !name.is_empty() => {
                    Some(format!("{owner}/{name}"))
                }
                _ => None,
            }
        })
        .unwrap_or_else(|| repository_url.to_string())
}
