//! Part manifest: the index-based correspondence between part files,
//! link files, and response files.
//!
//! The numeric part index is the single source of truth; every file name
//! is derived from it and the configured prefixes, so no stage ever needs
//! to reverse-engineer one name from another.

use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::ports::filesystem::FileSystem;

/// Extension shared by the dataset, part files, and response files.
const PART_EXT: &str = ".csv";

/// One part of the dataset, identified by its position in the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartEntry {
    index: u64,
}

impl PartEntry {
    /// Creates an entry for the given part index.
    #[must_use]
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    /// The part's position in the split, starting at 0.
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// File name of the part, `{prefix}_{n}.csv`.
    #[must_use]
    pub fn part_name(&self, config: &PipelineConfig) -> String {
        format!("{}_{}{PART_EXT}", config.part_prefix, self.index)
    }

    /// File name of the part's URL-only link file.
    #[must_use]
    pub fn link_name(&self, config: &PipelineConfig) -> String {
        format!("{}_{}{}", config.part_prefix, self.index, config.link_suffix)
    }

    /// File name of the checker's response file for this part.
    #[must_use]
    pub fn response_name(&self, config: &PipelineConfig) -> String {
        format!("{}{}", config.response_prefix, self.link_name(config))
    }

    /// Full path of the part file.
    #[must_use]
    pub fn part_path(&self, config: &PipelineConfig) -> PathBuf {
        config.data_dir.join(self.part_name(config))
    }

    /// Full path of the link file.
    #[must_use]
    pub fn link_path(&self, config: &PipelineConfig) -> PathBuf {
        config.data_dir.join(self.link_name(config))
    }

    /// Full path of the response file.
    #[must_use]
    pub fn response_path(&self, config: &PipelineConfig) -> PathBuf {
        config.data_dir.join(self.response_name(config))
    }
}

/// The ordered set of parts present in the working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<PartEntry>,
}

impl Manifest {
    /// Creates a manifest from entries, sorted by index.
    #[must_use]
    pub fn new(mut entries: Vec<PartEntry>) -> Self {
        entries.sort();
        Self { entries }
    }

    /// Scans the working directory for part files.
    ///
    /// Any file whose name parses as `{prefix}_{n}.csv` is included, so
    /// parts left over from an earlier, unarchived run are picked up too.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be listed.
    pub fn discover(fs: &dyn FileSystem, config: &PipelineConfig) -> Result<Self, String> {
        let names = fs.list_dir(&config.data_dir).map_err(|e| {
            format!("failed to list working directory {}: {e}", config.data_dir.display())
        })?;
        let entries = names
            .iter()
            .filter_map(|name| parse_part_index(name, config))
            .map(PartEntry::new)
            .collect();
        Ok(Self::new(entries))
    }

    /// The parts in ascending index order.
    #[must_use]
    pub fn entries(&self) -> &[PartEntry] {
        &self.entries
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parts are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses a part index out of a file name, or `None` if the name is not a
/// part file.
#[must_use]
pub fn parse_part_index(name: &str, config: &PipelineConfig) -> Option<u64> {
    name.strip_prefix(&config.part_prefix)?
        .strip_prefix('_')?
        .strip_suffix(PART_EXT)?
        .parse()
        .ok()
}
