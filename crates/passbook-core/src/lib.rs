//! # passbook-core
//!
//! Core entry store for passbook including:
//! - Credential entries gated by a per-entry security question
//! - Plain-text flat-file persistence, rewritten on every mutation
//! - JSON settings for the store location and log filter

pub mod entry;
pub mod error;
pub mod settings;
pub mod storage;
mod store;

pub use entry::{Entry, RevealedPassword};
pub use error::{Result, StoreError};
pub use settings::{Settings, SettingsManager, DEFAULT_STORE_FILE};
pub use storage::{EntryStorage, FlatFileStorage, LoadedEntries, Truncation};
pub use store::{EntryStore, LoadReport};
