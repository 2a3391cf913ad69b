//! # Daily Digest report builder
//!
//! Fetches every report block in sequence and splices the rendered markdown
//! into the delimited section of the README.
//!
//! ## Usage
//!
//! ```sh
//! GITHUB_REPOSITORY_OWNER=octocat GITHUB_REPOSITORY=octocat/octocat daily_digest
//! ```
//!
//! ## Pipeline
//!
//! 1. **Blocks**: each producer fetches its upstream; failures become
//!    `_Failed to fetch._` for that block only
//! 2. **Assembly**: timestamp line plus blocks, joined by blank lines
//! 3. **Splice**: README region replaced (or created/appended) and written
//!    only when the text changed
//!
//! Prints `Updated README section.` or `No changes needed.` on stdout.

use chrono::Utc;
use clap::Parser;
use daily_digest::api::ApiClient;
use daily_digest::cli::ReportArgs;
use daily_digest::outputs::{markdown, section};
use daily_digest::report::collect_blocks;
use daily_digest::utils::init_tracing;
use std::error::Error;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let start_time = std::time::Instant::now();
    info!("daily_digest starting up");

    let args = ReportArgs::parse();
    debug!(
        owner = %args.owner,
        readme = %args.readme_path.display(),
        authenticated = args.token().is_some(),
        "Parsed configuration"
    );

    let api = ApiClient::new(args.token())?;
    let now = Utc::now();

    let blocks = collect_blocks(&api, &args, now).await;
    let degraded = blocks.iter().filter(|b| b.is_degraded()).count();
    let md = markdown::report_to_markdown(now, &blocks);

    let outcome = section::update_section(&args.readme_path, args.document_title(), &md).await?;
    println!(
        "{}",
        if outcome.changed() {
            "Updated README section."
        } else {
            "No changes needed."
        }
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        ?outcome,
        blocks = blocks.len(),
        degraded,
        "Execution complete"
    );
    Ok(())
}
