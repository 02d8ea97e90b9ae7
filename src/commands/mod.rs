//! Command dispatch and handlers.

pub mod archive;
pub mod correlate;
pub mod extract;
pub mod run;
pub mod split;
pub mod submit;

use std::path::Path;

use crate::cli::Command;
use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::preflight;
use crate::RunFailure;

/// Dispatch a parsed command to its handler.
///
/// Builds the live context, resolves configuration, and runs the
/// pre-flight checks before any stage executes.
///
/// # Errors
///
/// Returns a [`RunFailure`] if configuration cannot be resolved, a
/// pre-flight check fails, or the selected command handler fails.
pub fn dispatch(command: &Command, config_path: Option<&Path>) -> Result<(), RunFailure> {
    let ctx = ServiceContext::live();
    let config =
        PipelineConfig::resolve(ctx.fs.as_ref(), config_path).map_err(RunFailure::from)?;
    preflight::check(&ctx, &config)
        .map_err(|err| RunFailure::with_code(err.exit_code(), err.to_string()))?;
    dispatch_with_context(command, &ctx, &config).map_err(RunFailure::from)
}

/// Dispatch a command with the given service context and configuration.
fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &PipelineConfig,
) -> Result<(), String> {
    match command {
        Command::Run => run::run(ctx, config),
        Command::Split => split::run(ctx, config),
        Command::Extract => extract::run(ctx, config),
        Command::Submit => submit::run(ctx, config),
        Command::Correlate => correlate::run(ctx, config),
        Command::Archive => archive::run(ctx, config),
    }
}
