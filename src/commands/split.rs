//! `linksweep split` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::chunk;

/// Execute the `split` command.
///
/// # Errors
///
/// Returns an error string if the dataset cannot be split.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let manifest = chunk::split_dataset(ctx, config)?;
    println!("{} part file(s) written to {}.", manifest.len(), config.data_dir.display());
    Ok(())
}
