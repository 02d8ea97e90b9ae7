//! `linksweep archive` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::archive;

/// Execute the `archive` command.
///
/// # Errors
///
/// Returns an error string if the archive directory cannot be created or
/// an artifact cannot be moved.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let archive_dir = archive::archive_run(ctx, config)?;
    println!("Artifacts saved to {}.", archive_dir.display());
    println!("{} may be uploaded for link repair work.", config.report);
    Ok(())
}
