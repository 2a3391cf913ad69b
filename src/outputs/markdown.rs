//! Report text assembly.

use crate::models::Block;
use crate::utils::format_utc_minute;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::iter;

/// `_Last update: **2025-05-06 14:03 UTC**_` followed by a newline.
pub fn timestamp_line(now: DateTime<Utc>) -> String {
    format!("_Last update: **{}**_\n", format_utc_minute(now))
}

/// Join the timestamp line and every rendered block with blank lines.
pub fn report_to_markdown(now: DateTime<Utc>, blocks: &[Block]) -> String {
    iter::once(timestamp_line(now))
        .chain(blocks.iter().map(Block::render))
        .join("\n\n")
}
