//! Live adapter for the `IdGenerator` port.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::ports::IdGenerator;

/// Live ID generator producing timestamp-plus-counter run identifiers.
///
/// The counter disambiguates runs started within the same second, so IDs
/// are unique within a process and collisions across processes require
/// two runs in the same wall-clock second.
pub struct LiveIdGenerator {
    counter: AtomicU64,
}

impl LiveIdGenerator {
    /// Creates a new live ID generator.
    #[must_use]
    pub fn new() -> Self {
        Self { counter: AtomicU64::new(0) }
    }
}

impl Default for LiveIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{stamp}-{n}")
    }
}
