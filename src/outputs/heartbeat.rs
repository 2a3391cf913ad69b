//! Heartbeat document: a fixed template with one minute-resolution timestamp.
//!
//! The file is rewritten only when the rendered text differs from what is on
//! disk, so two runs within the same minute leave it untouched.

use crate::utils::format_utc_minute;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// What [`update_heartbeat`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatUpdate {
    Updated,
    Unchanged,
}

impl HeartbeatUpdate {
    /// Status line printed by the heartbeat binary.
    pub fn message(self) -> &'static str {
        match self {
            HeartbeatUpdate::Updated => "Heartbeat updated.",
            HeartbeatUpdate::Unchanged => "No change; heartbeat already up to date.",
        }
    }
}

pub fn render_heartbeat(now: DateTime<Utc>) -> String {
    format!(
        "# Daily Heartbeat\n\
         This file is automatically updated once per day by a workflow.\n\n\
         Last update: **{}**\n",
        format_utc_minute(now)
    )
}

/// Write `content` to `path` unless the file already holds exactly these bytes.
/// A missing file counts as empty.
///
/// # Errors
///
/// Returns read errors other than not-found, and any write error.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn update_heartbeat(path: &Path, content: &str) -> Result<HeartbeatUpdate, Box<dyn Error>> {
    let existing = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    if existing == content.as_bytes() {
        debug!("Heartbeat unchanged");
        return Ok(HeartbeatUpdate::Unchanged);
    }

    fs::write(path, content).await?;
    info!("Heartbeat written");
    Ok(HeartbeatUpdate::Updated)
}
