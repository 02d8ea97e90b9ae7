//! Pipeline configuration.
//!
//! Every stage receives an explicit [`PipelineConfig`] rather than reading
//! process-wide constants, so stages are independently testable and a run
//! can be re-pointed at a different working area from a YAML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ports::filesystem::FileSystem;

/// File name looked for in the current directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "linksweep.yaml";

/// Configuration for a pipeline run.
///
/// All fields have defaults, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Working directory holding the dataset and all generated artifacts.
    pub data_dir: PathBuf,
    /// Source dataset file name inside `data_dir`.
    pub dataset: String,
    /// Part files are named `{part_prefix}_{n}.csv`.
    pub part_prefix: String,
    /// Link-file name = part file stem + this suffix.
    pub link_suffix: String,
    /// Response-file name = this prefix + link-file name.
    pub response_prefix: String,
    /// Append-only report file name inside `data_dir`.
    pub report: String,
    /// Archive directories are named `{archive_prefix}{run_id}`.
    pub archive_prefix: String,
    /// Maximum rows per part file; must be at least 1.
    pub max_rows_per_part: usize,
    /// Status tokens that count as reportable link errors.
    pub error_statuses: Vec<String>,
    /// External checker; invoked as `{checker_command} {link_file_path}`.
    pub checker_command: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dataset: "urls.csv".to_string(),
            part_prefix: "part".to_string(),
            link_suffix: "_links.csv".to_string(),
            response_prefix: "res_".to_string(),
            report: "logfile.csv".to_string(),
            archive_prefix: "logid_".to_string(),
            max_rows_per_part: 499,
            error_statuses: ["0", "401", "403", "404", "500", "501", "503"]
                .into_iter()
                .map(String::from)
                .collect(),
            checker_command: "linkcheck".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, String> {
        let contents = fs
            .read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| format!("failed to parse config {}: {e}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit path must load; otherwise `linksweep.yaml` in the
    /// current directory is used when present; otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn resolve(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            return Self::load(fs, path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if fs.exists(default_path) {
            return Self::load(fs, default_path);
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_rows_per_part == 0 {
            return Err("max_rows_per_part must be at least 1".to_string());
        }
        Ok(())
    }

    /// Path to the source dataset.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.dataset)
    }

    /// Path to the append-only report file.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join(&self.report)
    }

    /// Returns `true` if the status token is a reportable link error.
    #[must_use]
    pub fn is_error_status(&self, status: &str) -> bool {
        self.error_statuses.iter().any(|s| s == status)
    }
}
