//! Deterministic fake adapters for tests.
//!
//! These stand in for the real filesystem, the external checker, and the
//! run-ID source so pipeline stages can be exercised without disk access
//! or subprocesses.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// In-memory filesystem.
///
/// Cloning is cheap and clones share the same underlying state, which lets
/// a test hold a handle to the filesystem it handed to a `ServiceContext`.
#[derive(Clone, Default)]
pub struct MemFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl MemFileSystem {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileSystem for MemFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().expect("mem fs lock poisoned");
        files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("file not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().expect("mem fs lock poisoned");
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().expect("mem fs lock poisoned");
        files.entry(path.to_path_buf()).or_default().push_str(contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().expect("mem fs lock poisoned");
        if files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path) {
            return true;
        }
        let dirs = self.dirs.lock().expect("mem fs lock poisoned");
        dirs.iter().any(|d| d.starts_with(path))
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.exists(path) {
            return Err(format!("directory not found: {}", path.display()).into());
        }
        let mut names = BTreeSet::new();
        {
            let files = self.files.lock().expect("mem fs lock poisoned");
            for key in files.keys() {
                if let Ok(rest) = key.strip_prefix(path) {
                    if let Some(first) = rest.components().next() {
                        names.insert(first.as_os_str().to_string_lossy().into_owned());
                    }
                }
            }
        }
        {
            let dirs = self.dirs.lock().expect("mem fs lock poisoned");
            for dir in &*dirs {
                if let Ok(rest) = dir.strip_prefix(path) {
                    if let Some(first) = rest.components().next() {
                        names.insert(first.as_os_str().to_string_lossy().into_owned());
                    }
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    fn create_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut dirs = self.dirs.lock().expect("mem fs lock poisoned");
        dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().expect("mem fs lock poisoned");
        let contents = files
            .remove(from)
            .ok_or_else(|| format!("file not found: {}", from.display()))?;
        files.insert(to.to_path_buf(), contents);
        Ok(())
    }
}

/// Fake checker that answers each submitted link file with a canned
/// response file.
///
/// The command's last whitespace-separated token is taken as the link-file
/// path; a response file named with the given prefix is written next to it,
/// one `url,text/html,<status>` row per URL. Statuses default to `200`
/// unless overridden per URL with [`CannedChecker::with_status`]. Clones
/// share the invocation log, so a test can keep a handle to the checker it
/// handed to a `ServiceContext`.
#[derive(Clone)]
pub struct CannedChecker {
    fs: MemFileSystem,
    response_prefix: String,
    statuses: HashMap<String, String>,
    invocations: Arc<Mutex<Vec<String>>>,
    exit_code: i32,
    write_response: bool,
}

impl CannedChecker {
    /// Creates a checker writing responses through the given filesystem.
    #[must_use]
    pub fn new(fs: MemFileSystem, response_prefix: &str) -> Self {
        Self {
            fs,
            response_prefix: response_prefix.to_string(),
            statuses: HashMap::new(),
            invocations: Arc::new(Mutex::new(Vec::new())),
            exit_code: 0,
            write_response: true,
        }
    }

    /// Sets the status token reported for a URL.
    #[must_use]
    pub fn with_status(mut self, url: &str, status: &str) -> Self {
        self.statuses.insert(url.to_string(), status.to_string());
        self
    }

    /// Makes every invocation exit with the given code.
    #[must_use]
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    /// Suppresses response-file output, simulating a checker that dies
    /// before writing anything.
    #[must_use]
    pub fn without_responses(mut self) -> Self {
        self.write_response = false;
        self
    }

    /// The commands this checker has been invoked with, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().expect("invocations lock poisoned").clone()
    }
}

impl ShellExecutor for CannedChecker {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        self.invocations
            .lock()
            .expect("invocations lock poisoned")
            .push(command.to_string());

        let link_path = command
            .split_whitespace()
            .last()
            .map(PathBuf::from)
            .ok_or_else(|| format!("empty checker command: {command:?}"))?;

        if self.write_response {
            let links = self.fs.read_to_string(&link_path)?;
            let mut rows = String::new();
            for url in links.lines() {
                let status = self.statuses.get(url).map_or("200", String::as_str);
                rows.push_str(&format!("{url},text/html,{status}\n"));
            }

            let name = link_path
                .file_name()
                .ok_or_else(|| format!("checker command has no file name: {command:?}"))?
                .to_string_lossy();
            let response_path = link_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(format!("{}{name}", self.response_prefix));
            self.fs.write(&response_path, &rows)?;
        }

        Ok(ShellOutput { exit_code: self.exit_code, stdout: String::new(), stderr: String::new() })
    }
}

/// ID generator that hands out a fixed sequence of identifiers.
pub struct FixedIdGenerator {
    ids: Mutex<Vec<String>>,
}

impl FixedIdGenerator {
    /// Creates a generator yielding the given IDs in order.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { ids: Mutex::new(ids.into_iter().map(Into::into).collect()) }
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate_id(&self) -> String {
        let mut ids = self.ids.lock().expect("id lock poisoned");
        assert!(!ids.is_empty(), "fixed id sequence exhausted");
        ids.remove(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_fs_round_trips_and_lists() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/a.csv"), "1").unwrap();
        fs.write(Path::new("data/b.csv"), "2").unwrap();
        fs.create_dir_all(Path::new("data/logid_7")).unwrap();

        assert_eq!(fs.read_to_string(Path::new("data/a.csv")).unwrap(), "1");
        assert!(fs.exists(Path::new("data")));
        assert!(fs.exists(Path::new("data/logid_7")));
        assert_eq!(
            fs.list_dir(Path::new("data")).unwrap(),
            vec!["a.csv".to_string(), "b.csv".to_string(), "logid_7".to_string()]
        );
    }

    #[test]
    fn mem_fs_clones_share_state() {
        let fs = MemFileSystem::new();
        let other = fs.clone();
        other.write(Path::new("x"), "shared").unwrap();

        assert_eq!(fs.read_to_string(Path::new("x")).unwrap(), "shared");
    }

    #[test]
    fn mem_fs_rename_moves_contents() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0.csv"), "row").unwrap();
        fs.rename(Path::new("data/part_0.csv"), Path::new("data/logid_1/part_0.csv")).unwrap();

        assert!(!fs.exists(Path::new("data/part_0.csv")));
        assert_eq!(fs.read_to_string(Path::new("data/logid_1/part_0.csv")).unwrap(), "row");
    }

    #[test]
    fn canned_checker_writes_response_rows() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0_links.csv"), "http://a\nhttp://b\n").unwrap();

        let checker =
            CannedChecker::new(fs.clone(), "res_").with_status("http://a", "404");
        let output = checker.run("linkcheck data/part_0_links.csv").unwrap();

        assert_eq!(output.exit_code, 0);
        assert_eq!(
            fs.read_to_string(Path::new("data/res_part_0_links.csv")).unwrap(),
            "http://a,text/html,404\nhttp://b,text/html,200\n"
        );
        assert_eq!(checker.invocations(), vec!["linkcheck data/part_0_links.csv".to_string()]);
    }

    #[test]
    fn canned_checker_can_withhold_responses() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0_links.csv"), "http://a\n").unwrap();

        let checker = CannedChecker::new(fs.clone(), "res_").without_responses().with_exit_code(3);
        let output = checker.run("linkcheck data/part_0_links.csv").unwrap();

        assert_eq!(output.exit_code, 3);
        assert!(!fs.exists(Path::new("data/res_part_0_links.csv")));
    }

    #[test]
    fn fixed_id_generator_yields_in_order() {
        let gen = FixedIdGenerator::new(["1111", "2222"]);
        assert_eq!(gen.generate_id(), "1111");
        assert_eq!(gen.generate_id(), "2222");
    }
}
