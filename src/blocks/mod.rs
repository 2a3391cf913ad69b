//! Block producers, one per report section.
//!
//! Every producer fetches from its upstream, formats markdown, and returns a
//! [`Block`](crate::models::Block). Producers never return errors: a failed
//! fetch becomes degraded output so the rest of the report still renders.
//!
//! # Producers
//!
//! | Block | Module | Upstream | Cap |
//! |-------|--------|----------|-----|
//! | Languages | [`github`] | repo listing + per-repo languages | [`LANGUAGE_LIMIT`] |
//! | Top starred | [`github`] | repository search | [`LIST_LIMIT`] |
//! | Recent repos | [`github`] | repo listing | [`LIST_LIMIT`] |
//! | Recent activity | [`github`] | public events | [`LIST_LIMIT`] |
//! | Help wanted | [`github`] | issue search | [`LIST_LIMIT`] |
//! | Headlines | [`feeds`] | RSS/Atom news feed | [`LIST_LIMIT`] |
//! | Q&A | [`feeds`] | tag feed | [`LIST_LIMIT`] |
//! | Market snapshot | [`market`] | exchange rates + crypto price | one line per pair |
//! | Weather | [`weather`] | forecast API | — |
//! | TIL | [`prompt`] | none | — |

pub mod feeds;
pub mod github;
pub mod market;
pub mod prompt;
pub mod weather;

/// Cap for list-shaped blocks.
pub const LIST_LIMIT: usize = 5;
/// Cap for the language breakdown.
pub const LANGUAGE_LIMIT: usize = 6;
