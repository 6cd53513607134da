//! Entry store: the in-memory entry sequence and its persistence
//!
//! Every successful add, modify or delete rewrites the whole backing file.
//! If a rewrite fails the change stays in memory, the store is marked dirty,
//! and the next [`EntryStore::flush`] (or drop) tries again.

use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::entry::{validate_token, Entry, RevealedPassword};
use crate::error::{Result, StoreError};
use crate::storage::{EntryStorage, FlatFileStorage, Truncation};

/// What happened while loading the store
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of entries read
    pub loaded: usize,
    /// Where parsing stopped on malformed data, if it did
    pub truncated: Option<Truncation>,
    /// Read failure that forced an empty store
    pub read_error: Option<String>,
}

impl LoadReport {
    /// Whether anything went wrong while loading
    pub fn has_warnings(&self) -> bool {
        self.truncated.is_some() || self.read_error.is_some()
    }
}

/// Credential entry store
pub struct EntryStore {
    /// Storage backend
    storage: Box<dyn EntryStorage>,
    /// Entries in insertion order
    entries: Vec<Entry>,
    /// Whether memory differs from the last successful save
    dirty: bool,
    load_report: LoadReport,
}

impl EntryStore {
    /// Open the flat-file store at `path`, loading any existing entries
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_storage(Box::new(FlatFileStorage::new(path)))
    }

    /// Open a store on an arbitrary backend
    ///
    /// Load failures never fail construction: a read error yields an empty
    /// store, and malformed data keeps the entries read before it. Both are
    /// logged and recorded in [`EntryStore::load_report`].
    pub fn with_storage(storage: Box<dyn EntryStorage>) -> Self {
        let mut report = LoadReport::default();

        let entries = match storage.load() {
            Ok(loaded) => {
                if let Some(truncation) = &loaded.truncated {
                    warn!(
                        "Store data malformed at {}; kept {} entries read before it",
                        truncation,
                        loaded.entries.len()
                    );
                }
                report.truncated = loaded.truncated;
                loaded.entries
            }
            Err(e) => {
                warn!("Failed to read store ({}), starting empty: {}", storage.backend_name(), e);
                report.read_error = Some(e.to_string());
                Vec::new()
            }
        };

        report.loaded = entries.len();
        debug!("Entry store opened with {} entries", entries.len());

        Self {
            storage,
            entries,
            dirty: false,
            load_report: report,
        }
    }

    /// Get the report from the initial load
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there are changes not yet written to storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Add a new entry and persist
    pub fn add_entry(
        &mut self,
        website: &str,
        username: &str,
        password: &str,
        question: &str,
        answer: &str,
    ) -> Result<()> {
        let entry = Entry::new(website, username, password, question, answer)?;

        if self.find(website, username).is_some() {
            return Err(StoreError::DuplicateEntry {
                website: website.to_string(),
                username: username.to_string(),
            });
        }

        self.entries.push(entry);
        self.mark_dirty_and_save()?;

        info!("Added entry: {} ({})", username, website);
        Ok(())
    }

    /// `(website, username)` pairs in insertion order
    pub fn list_entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|e| (e.website(), e.username()))
    }

    /// Entries for `website` (exact, case-sensitive), in insertion order
    pub fn find_by_website(&self, website: &str) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.website() == website)
            .collect()
    }

    /// First entry keyed by `(website, username)`
    pub fn find(&self, website: &str, username: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.matches(website, username))
    }

    /// Return `entry`'s password if `answer` matches its verification answer
    pub fn reveal_password(&self, entry: &Entry, answer: &str) -> Result<RevealedPassword> {
        let revealed = entry.reveal_password(answer);
        if revealed.is_err() {
            info!("Reveal refused for {} ({})", entry.username(), entry.website());
        }
        revealed
    }

    /// Replace the username and password of an entry after checking its answer
    ///
    /// The new username is not checked against other entries for the same
    /// website; a colliding rename is allowed and only logged.
    pub fn modify_entry(
        &mut self,
        website: &str,
        username: &str,
        answer: &str,
        new_username: &str,
        new_password: &str,
    ) -> Result<()> {
        validate_token("new username", new_username)?;
        validate_token("new password", new_password)?;

        let index = self
            .position(website, username)
            .ok_or_else(|| StoreError::not_found(website, username))?;

        if !self.entries[index].answer_matches(answer) {
            info!("Modify refused for {} ({})", username, website);
            return Err(StoreError::VerificationFailed);
        }

        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.matches(website, new_username));
        if collides {
            warn!(
                "Renaming {} to {} on {} duplicates an existing entry",
                username, new_username, website
            );
        }

        self.entries[index].set_credentials(new_username, new_password);
        self.mark_dirty_and_save()?;

        info!("Modified entry: {} -> {} ({})", username, new_username, website);
        Ok(())
    }

    /// Remove an entry after checking its stored password
    pub fn delete_entry(&mut self, website: &str, username: &str, password: &str) -> Result<()> {
        let index = self
            .position(website, username)
            .ok_or_else(|| StoreError::not_found(website, username))?;

        if !self.entries[index].password_matches(password) {
            info!("Delete refused for {} ({})", username, website);
            return Err(StoreError::VerificationFailed);
        }

        self.entries.remove(index);
        self.mark_dirty_and_save()?;

        info!("Deleted entry: {} ({})", username, website);
        Ok(())
    }

    /// Write every entry to storage, whether or not anything changed
    pub fn save(&mut self) -> Result<()> {
        self.storage.save(&self.entries)?;
        self.dirty = false;
        Ok(())
    }

    /// Write to storage only if there are unsaved changes
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.save()
    }

    /// Flush and close the store, reporting any final write failure
    ///
    /// A failure is returned once; dropping the closed store does not retry it.
    pub fn close(mut self) -> Result<()> {
        let result = self.flush();
        self.dirty = false;
        result
    }

    fn position(&self, website: &str, username: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.matches(website, username))
    }

    fn mark_dirty_and_save(&mut self) -> Result<()> {
        self.dirty = true;
        self.save()
    }
}

impl Drop for EntryStore {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            error!("Failed to flush entry store on shutdown: {}", e);
        }
    }
}
