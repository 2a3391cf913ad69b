//! Output generation: report markdown and the two on-disk documents.
//!
//! # Submodules
//!
//! - [`markdown`]: Joins the timestamp line and rendered blocks into the report text
//! - [`section`]: Splices the report into the delimited README region
//! - [`heartbeat`]: Renders and conditionally rewrites the heartbeat file
//!
//! # Documents
//!
//! ```text
//! README.md
//! ├── free-form content (preserved)
//! ├── <!-- DAILY-SECTION:START -->
//! ├── report text (replaced every run)
//! └── <!-- DAILY-SECTION:END -->
//!
//! HEARTBEAT.md
//! └── three-line template with one timestamp
//! ```
//!
//! Both writers compare against the current file and skip the write when the
//! bytes would not change.

pub mod heartbeat;
pub mod markdown;
pub mod section;
