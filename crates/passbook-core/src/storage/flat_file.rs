//! Flat-file storage backend
//!
//! Each entry occupies three lines:
//!
//! ```text
//! <website> <username> <password>
//! <verification question>
//! <verification answer>
//! ```
//!
//! Records repeat back to back with no header, footer or count. Reading is
//! tolerant: it stops at the first malformed record and keeps what came
//! before it.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{EntryStorage, LoadedEntries, Truncation};
use crate::entry::Entry;
use crate::error::Result;

/// Plain-text file storage backend
pub struct FlatFileStorage {
    path: PathBuf,
}

impl FlatFileStorage {
    /// Create a backend for the file at `path`; the file need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file written first and renamed over the real one
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl EntryStorage for FlatFileStorage {
    fn load(&self) -> Result<LoadedEntries> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No existing store file at {:?}", self.path);
                return Ok(LoadedEntries::default());
            }
            Err(e) => return Err(e.into()),
        };

        let loaded = read_entries(BufReader::new(file))?;
        debug!("Loaded {} entries from {:?}", loaded.entries.len(), self.path);
        Ok(loaded)
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        let mut contents = Vec::new();
        write_entries(&mut contents, entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write atomically using a temp file
        let temp_path = self.temp_path();
        fs::write(&temp_path, &contents)?;
        fs::rename(&temp_path, &self.path)?;

        debug!("Saved {} entries to {:?}", entries.len(), self.path);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "Flat File Storage"
    }
}

/// Serialize entries in stored order
pub(crate) fn write_entries<W: Write>(writer: &mut W, entries: &[Entry]) -> io::Result<()> {
    for entry in entries {
        writeln!(
            writer,
            "{} {} {}",
            entry.website(),
            entry.username(),
            entry.password()
        )?;
        writeln!(writer, "{}", entry.verification_question())?;
        writeln!(writer, "{}", entry.verification_answer())?;
    }
    writer.flush()
}

/// Parse records until EOF or the first malformed record
///
/// Bytes are decoded per line, so a line that is not UTF-8 ends the parse
/// like any other malformed data instead of failing the whole load.
pub(crate) fn read_entries<R: BufRead>(reader: R) -> io::Result<LoadedEntries> {
    let mut lines = reader.split(b'\n').enumerate();
    let mut entries = Vec::new();

    let truncate = |entries: Vec<Entry>, line: usize, reason: String| LoadedEntries {
        entries,
        truncated: Some(Truncation { line, reason }),
    };

    loop {
        // Blank lines between records are skipped
        let (header_line, header) = loop {
            let Some((line, text)) = next_line(&mut lines)? else {
                return Ok(LoadedEntries {
                    entries,
                    truncated: None,
                });
            };
            match text {
                None => return Ok(truncate(entries, line, INVALID_UTF8.to_string())),
                Some(text) if text.trim().is_empty() => continue,
                Some(text) => break (line, text),
            }
        };

        let fields: Vec<&str> = header.split_whitespace().collect();
        let [website, username, password] = fields.as_slice() else {
            let reason = format!("expected 3 header fields, found {}", fields.len());
            return Ok(truncate(entries, header_line, reason));
        };

        let question = match next_line(&mut lines)? {
            Some((_, Some(text))) => text,
            Some((line, None)) => return Ok(truncate(entries, line, INVALID_UTF8.to_string())),
            None => {
                let reason = "missing verification question".to_string();
                return Ok(truncate(entries, header_line + 1, reason));
            }
        };
        let answer = match next_line(&mut lines)? {
            Some((_, Some(text))) => text,
            Some((line, None)) => return Ok(truncate(entries, line, INVALID_UTF8.to_string())),
            None => {
                let reason = "missing verification answer".to_string();
                return Ok(truncate(entries, header_line + 2, reason));
            }
        };

        match Entry::new(website, username, password, &question, &answer) {
            Ok(entry) => entries.push(entry),
            Err(e) => return Ok(truncate(entries, header_line, e.to_string())),
        }
    }
}

const INVALID_UTF8: &str = "invalid UTF-8";

/// Next line as its 1-based number and text; `None` text means it was not UTF-8
fn next_line<I>(lines: &mut I) -> io::Result<Option<(usize, Option<String>)>>
where
    I: Iterator<Item = (usize, io::Result<Vec<u8>>)>,
{
    let Some((index, bytes)) = lines.next() else {
        return Ok(None);
    };

    let mut bytes = bytes?;
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    Ok(Some((index + 1, String::from_utf8(bytes).ok())))
}
