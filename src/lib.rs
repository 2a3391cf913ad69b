//! # Daily Digest
//!
//! Builds a markdown digest of a GitHub account's activity plus a few public
//! feeds, and keeps it inside a delimited section of a README.
//!
//! ## Binaries
//!
//! - `daily_digest`: fetches every block and splices the report into the
//!   README between `<!-- DAILY-SECTION:START -->` and `<!-- DAILY-SECTION:END -->`
//! - `heartbeat`: rewrites `HEARTBEAT.md` when its timestamp changes
//!
//! ## Architecture
//!
//! 1. **Configuration**: [`cli`] resolves environment variables once
//! 2. **Blocks**: [`blocks`] producers fetch sequentially through [`api`]
//!    and degrade to a placeholder on failure
//! 3. **Assembly**: [`outputs::markdown`] joins the blocks under a timestamp
//! 4. **Splice**: [`outputs::section`] writes the README only if it changed

pub mod api;
pub mod blocks;
pub mod cli;
pub mod models;
pub mod outputs;
pub mod report;
pub mod utils;
