//! `linksweep correlate` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::correlate;
use crate::pipeline::manifest::Manifest;

/// Execute the `correlate` command against the parts currently present.
///
/// # Errors
///
/// Returns an error string if parts cannot be discovered, a file cannot
/// be read, or the report cannot be written.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let manifest = Manifest::discover(ctx.fs.as_ref(), config)?;
    let matches = correlate::match_responses(ctx, config, &manifest)?;
    println!("{matches} link error(s) logged to {}.", config.report);
    Ok(())
}
