//! Pre-flight validation: the working directory and dataset must exist
//! before any stage runs.

use std::fmt;
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::context::ServiceContext;

/// A fatal pre-flight failure.
///
/// Each variant maps to its own process exit status so operators and
/// wrapper scripts can tell the two setup mistakes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightError {
    /// The working directory does not exist.
    MissingDataDir(PathBuf),
    /// The source dataset file does not exist.
    MissingDataset(PathBuf),
}

impl PreflightError {
    /// The process exit status for this failure.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingDataDir(_) => 9,
            Self::MissingDataset(_) => 8,
        }
    }
}

impl fmt::Display for PreflightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDataDir(dir) => {
                write!(
                    f,
                    "working directory {} not found; start in its parent directory",
                    dir.display()
                )
            }
            Self::MissingDataset(path) => {
                write!(f, "dataset {} not found; place the source csv there", path.display())
            }
        }
    }
}

impl std::error::Error for PreflightError {}

/// Checks that the working directory and dataset exist, in that order.
///
/// # Errors
///
/// Returns the matching [`PreflightError`] variant on the first check that
/// fails. No files are created or modified.
pub fn check(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), PreflightError> {
    if !ctx.fs.exists(&config.data_dir) {
        return Err(PreflightError::MissingDataDir(config.data_dir.clone()));
    }
    let dataset = config.dataset_path();
    if !ctx.fs.exists(&dataset) {
        return Err(PreflightError::MissingDataset(dataset));
    }
    Ok(())
}
