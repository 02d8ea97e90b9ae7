//! `linksweep submit` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::manifest::Manifest;
use crate::pipeline::submit;

/// Execute the `submit` command against the parts currently present.
///
/// # Errors
///
/// Returns an error string if parts cannot be discovered or the checker
/// cannot be invoked.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let manifest = Manifest::discover(ctx.fs.as_ref(), config)?;
    let submitted = submit::submit_batches(ctx, config, &manifest)?;
    println!("{submitted} batch(es) submitted to {}.", config.checker_command);
    Ok(())
}
