//! Storage trait definitions

use crate::entry::Entry;
use crate::error::Result;

/// Trait for entry storage backends
pub trait EntryStorage {
    /// Read every persisted entry, in stored order
    ///
    /// A missing backing file is an empty result, not an error.
    fn load(&self) -> Result<LoadedEntries>;

    /// Replace the persisted contents with `entries`
    fn save(&self, entries: &[Entry]) -> Result<()>;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}

/// Result of a load: the entries read plus where parsing stopped early, if it did
#[derive(Debug, Default)]
pub struct LoadedEntries {
    pub entries: Vec<Entry>,
    pub truncated: Option<Truncation>,
}

/// Point at which a load stopped on malformed data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// 1-based line number of the offending line
    pub line: usize,
    pub reason: String,
}

impl std::fmt::Display for Truncation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}
