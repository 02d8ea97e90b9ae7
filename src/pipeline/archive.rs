//! Archival: move a run's artifacts into a uniquely named directory.

use std::path::PathBuf;

use log::info;

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::manifest;

/// Moves every working artifact into a fresh archive directory named
/// `{archive_prefix}{run_id}` under the working directory.
///
/// Artifacts are part files, link files, response files, and the report;
/// the source dataset stays in place. The run ID comes from the context's
/// generator, and a pre-existing directory of the same name is an error —
/// nothing is moved or overwritten in that case.
///
/// Returns the archive directory path.
///
/// # Errors
///
/// Returns an error if the archive directory already exists, cannot be
/// created, or any artifact cannot be moved.
pub fn archive_run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<PathBuf, String> {
    let run_id = ctx.id_gen.generate_id();
    let archive_dir = config.data_dir.join(format!("{}{run_id}", config.archive_prefix));
    if ctx.fs.exists(&archive_dir) {
        return Err(format!(
            "archive directory {} already exists, refusing to overwrite",
            archive_dir.display()
        ));
    }

    let names = ctx.fs.list_dir(&config.data_dir).map_err(|e| {
        format!("failed to list working directory {}: {e}", config.data_dir.display())
    })?;
    let artifacts: Vec<String> =
        names.into_iter().filter(|name| is_artifact(name, config)).collect();

    ctx.fs.create_dir_all(&archive_dir).map_err(|e| {
        format!("failed to create archive directory {}: {e}", archive_dir.display())
    })?;
    for name in &artifacts {
        let from = config.data_dir.join(name);
        let to = archive_dir.join(name);
        ctx.fs
            .rename(&from, &to)
            .map_err(|e| format!("failed to move {} into archive: {e}", from.display()))?;
    }

    info!("archived {} file(s) to {}", artifacts.len(), archive_dir.display());
    Ok(archive_dir)
}

/// Returns `true` for file names the pipeline generated: parts, link
/// files, response files, and the report.
fn is_artifact(name: &str, config: &PipelineConfig) -> bool {
    name == config.report
        || manifest::parse_part_index(name, config).is_some()
        || name.starts_with(&config.response_prefix)
        || (name.starts_with(&format!("{}_", config.part_prefix))
            && name.ends_with(&config.link_suffix))
}
