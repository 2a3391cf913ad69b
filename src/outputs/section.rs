//! Delimited README section management.
//!
//! The report owns everything between [`START_MARKER`] and [`END_MARKER`];
//! the rest of the document is never touched. The region ends at the first
//! end marker that has a start marker before it, and begins at the last start
//! marker preceding that end marker. A stray start marker above an appended
//! region therefore stays outside it.
//!
//! # Cases
//!
//! | Document | Result |
//! |----------|--------|
//! | missing | `# <title>` heading plus a new region |
//! | has a region | region replaced, markers included |
//! | no region | region appended after trimmed content |
//!
//! The file is only written when the resulting text differs from what is on
//! disk.

use std::error::Error;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

pub const START_MARKER: &str = "<!-- DAILY-SECTION:START -->";
pub const END_MARKER: &str = "<!-- DAILY-SECTION:END -->";

/// Byte range of the region in `doc`, markers included.
fn find_region(doc: &str) -> Option<(usize, usize)> {
    doc.match_indices(END_MARKER).find_map(|(end, _)| {
        doc[..end]
            .rfind(START_MARKER)
            .map(|start| (start, end + END_MARKER.len()))
    })
}

/// What [`update_section`] did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionUpdate {
    /// The document did not exist and was created.
    Created,
    /// The document was rewritten with new section content.
    Updated,
    /// The document already held exactly this content.
    Unchanged,
}

impl SectionUpdate {
    pub fn changed(self) -> bool {
        !matches!(self, SectionUpdate::Unchanged)
    }
}

/// `content` wrapped in the two markers, without a trailing newline.
pub fn render_region(content: &str) -> String {
    format!("{START_MARKER}\n{content}\n{END_MARKER}")
}

/// Text of a freshly created document.
pub fn new_document(title: &str, content: &str) -> String {
    format!("# {title}\n\n{}\n", render_region(content))
}

/// Replace the existing region, or append one if the document has none.
///
/// # Arguments
///
/// * `existing` - Current document text
/// * `content` - Report text to place between the markers
///
/// # Returns
///
/// The new document text. Bytes outside the region are copied unchanged; when
/// no region exists the trimmed document is followed by a blank line and a
/// fresh region.
pub fn splice(existing: &str, content: &str) -> String {
    let region = render_region(content);
    match find_region(existing) {
        Some((start, end)) => format!("{}{region}{}", &existing[..start], &existing[end..]),
        None => format!("{}\n\n{region}\n", existing.trim_end()),
    }
}

/// Write `content` into the delimited region of the document at `path`.
///
/// # Errors
///
/// Any file system error other than the document being absent is returned
/// as-is, including a missing parent directory when creating the document.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = content.len()))]
pub async fn update_section(path: &Path, title: &str, content: &str) -> Result<SectionUpdate, Box<dyn Error>> {
    let existing = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::write(path, new_document(title, content)).await?;
            info!("Created document with daily section");
            return Ok(SectionUpdate::Created);
        }
        Err(e) => return Err(e.into()),
    };

    let updated = splice(&existing, content);
    if updated == existing {
        debug!("Daily section already up to date");
        return Ok(SectionUpdate::Unchanged);
    }

    fs::write(path, updated).await?;
    info!("Updated daily section");
    Ok(SectionUpdate::Updated)
}
