//! Rewrite the heartbeat file when its rendered timestamp differs from disk.

use chrono::Utc;
use clap::Parser;
use daily_digest::cli::HeartbeatArgs;
use daily_digest::outputs::heartbeat::{render_heartbeat, update_heartbeat};
use daily_digest::utils::init_tracing;
use std::error::Error;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = HeartbeatArgs::parse();
    debug!(path = %args.heartbeat_path.display(), "Parsed heartbeat arguments");

    let content = render_heartbeat(Utc::now());
    let outcome = update_heartbeat(&args.heartbeat_path, &content).await?;
    println!("{}", outcome.message());
    Ok(())
}
