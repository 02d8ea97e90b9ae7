//! `linksweep extract` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::extract;
use crate::pipeline::manifest::Manifest;

/// Execute the `extract` command against the parts currently present.
///
/// # Errors
///
/// Returns an error string if parts cannot be discovered or a link file
/// cannot be written.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let manifest = Manifest::discover(ctx.fs.as_ref(), config)?;
    extract::extract_links(ctx, config, &manifest)?;
    println!("{} link file(s) written.", manifest.len());
    Ok(())
}
