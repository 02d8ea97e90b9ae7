//! Link extraction: write a URL-only companion file for every part.

use log::{info, warn};

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::manifest::Manifest;
use crate::pipeline::record;

/// Writes each part's URLs, one per line in row order, to the part's link
/// file.
///
/// Rows without a URL field are skipped with a warning; the checker only
/// accepts URLs, and one bad row should not abort a batch mid-run.
///
/// # Errors
///
/// Returns an error if a part cannot be read or a link file cannot be
/// written.
pub fn extract_links(
    ctx: &ServiceContext,
    config: &PipelineConfig,
    manifest: &Manifest,
) -> Result<(), String> {
    for entry in manifest.entries() {
        let part_path = entry.part_path(config);
        let text = ctx
            .fs
            .read_to_string(&part_path)
            .map_err(|e| format!("failed to read part {}: {e}", part_path.display()))?;
        let records =
            record::parse_records(&text).map_err(|e| format!("{}: {e}", part_path.display()))?;

        let mut lines = String::new();
        for (row, rec) in records.iter().enumerate() {
            if let Some(url) = rec.url() {
                lines.push_str(url);
                lines.push('\n');
            } else {
                warn!(
                    "{}: row {} ({}) has no url field, skipping",
                    entry.part_name(config),
                    row + 1,
                    rec.id()
                );
            }
        }

        let link_path = entry.link_path(config);
        ctx.fs
            .write(&link_path, &lines)
            .map_err(|e| format!("failed to write link file {}: {e}", link_path.display()))?;
        info!("extracted {} into {}", entry.part_name(config), entry.link_name(config));
    }
    Ok(())
}
