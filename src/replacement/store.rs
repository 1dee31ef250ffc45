// Replacement store - persists and loads the replacement table
// The durable file is the single source of truth; everything in memory is
// derived from it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use parking_lot::Mutex;

use super::codec;
use super::error::{ReplacementError, Result};
use super::Entry;
use crate::util::write_atomic;

/// Prefix of exported file names
pub const EXPORT_FILE_PREFIX: &str = "text_replacements_";

/// Backend for the persisted replacement table.
///
/// `load` distinguishes "no table yet" (`Ok(None)`) from "table present but
/// unreadable" (`Err`).
pub trait EntryRepository {
    /// Read the full persisted list
    fn load(&self) -> Result<Option<Vec<Entry>>>;

    /// Replace the full persisted list
    fn save(&self, entries: &[Entry]) -> Result<()>;

    /// Write `defaults` if nothing has been persisted yet.
    /// Returns whether anything was written.
    fn seed_if_missing(&self, defaults: &[Entry]) -> Result<bool> {
        if defaults.is_empty() || self.load()?.is_some() {
            return Ok(false);
        }
        self.save(defaults)?;
        Ok(true)
    }
}

/// CSV file on disk, written atomically
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the location configured in `settings`
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self::new(settings.storage_path(&crate::config::get_config_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl EntryRepository for CsvFileStore {
    fn load(&self) -> Result<Option<Vec<Entry>>> {
        crate::debug!("Loading replacements from {:?}", self.path);

        if !self.path.exists() {
            crate::debug!("No replacement file found, starting with empty table");
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(|e| ReplacementError::Load(e.to_string()))?;
        let entries = codec::decode_bytes(&bytes);

        crate::info!("Loaded {} text replacements", entries.len());
        Ok(Some(entries))
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        crate::debug!(
            "Persisting {} replacements to {:?}",
            entries.len(),
            self.path
        );

        // The durable table always carries counters so that turning counting
        // off and on again does not lose them.
        let document = codec::encode_document(entries, true);
        write_atomic(&self.path, &document)
            .map_err(|e| ReplacementError::Persistence(e.to_string()))?;

        crate::debug!("Replacements persisted successfully");
        Ok(())
    }

    fn seed_if_missing(&self, defaults: &[Entry]) -> Result<bool> {
        if defaults.is_empty() || self.exists() {
            return Ok(false);
        }
        crate::info!(
            "Seeding {:?} with {} default replacements",
            self.path,
            defaults.len()
        );
        self.save(defaults)?;
        Ok(true)
    }
}

/// In-process table, for embedders that persist elsewhere and for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Option<Vec<Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-persisted list
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(Some(entries)),
        }
    }

    /// Snapshot of what is currently persisted
    pub fn snapshot(&self) -> Option<Vec<Entry>> {
        self.entries.lock().clone()
    }
}

impl EntryRepository for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Entry>>> {
        Ok(self.entries.lock().clone())
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        let persistable = entries.iter().filter(|e| e.is_persistable()).cloned().collect();
        *self.entries.lock() = Some(persistable);
        Ok(())
    }
}

/// Read a user-chosen CSV document for import.
///
/// # Errors
/// `UnsupportedFormat` when the file name does not end in `.csv`,
/// `Load` when it cannot be read.
pub fn import_file(path: &Path) -> Result<Vec<Entry>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(ReplacementError::UnsupportedFormat(
            path.display().to_string(),
        ));
    }

    let bytes = fs::read(path).map_err(|e| ReplacementError::Load(e.to_string()))?;
    let entries = codec::decode_bytes(&bytes);
    crate::info!("Read {} replacements from {:?}", entries.len(), path);
    Ok(entries)
}

/// File name for an export taken at `now`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("{}{}.csv", EXPORT_FILE_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Write `entries` to a new timestamped CSV in `dir`.
///
/// The counter column is included only when `with_counter` is set.
pub fn export_file(dir: &Path, entries: &[Entry], with_counter: bool) -> Result<PathBuf> {
    let path = dir.join(export_file_name(Local::now()));
    let document = codec::encode_document(entries, with_counter);

    write_atomic(&path, &document).map_err(|e| ReplacementError::Persistence(e.to_string()))?;

    crate::info!("Exported replacements to {:?}", path);
    Ok(path)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
