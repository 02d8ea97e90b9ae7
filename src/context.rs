//! Service context bundling all port trait objects.

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::id_gen::LiveIdGenerator;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;
use crate::ports::shell::ShellExecutor;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Tests construct
/// the struct directly with the fake adapters.
pub struct ServiceContext {
    /// Filesystem for all pipeline I/O.
    pub fs: Box<dyn FileSystem>,
    /// Shell executor for invoking the external checker.
    pub shell: Box<dyn ShellExecutor>,
    /// Run-ID generator for archive naming.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
            id_gen: Box::new(LiveIdGenerator::new()),
        }
    }
}
