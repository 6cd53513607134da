//! Storage backends for entry persistence
//!
//! The store talks to its backing file through [`EntryStorage`]; the only
//! production backend is the plain-text [`FlatFileStorage`].

mod flat_file;
mod traits;

pub use flat_file::FlatFileStorage;
pub use traits::{EntryStorage, LoadedEntries, Truncation};
