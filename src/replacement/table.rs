// Table controller - owns the editable replacement list
//
// Position 0 is always an empty placeholder row for adding a new rule. The
// controller never persists on its own; callers check `is_dirty` and `save`.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::{ReplacementError, Result};
use super::index::{resolve_position, ReplacementIndex, Suggestion};
use super::search::SearchNavigator;
use super::store::{self, EntryRepository};
use super::Entry;
use crate::config::Settings;

/// Controller behind an exclusive lock, for callers on more than one thread
pub type SharedTable<R> = Arc<Mutex<TableController<R>>>;

/// Authoritative in-memory replacement table
#[derive(Debug)]
pub struct TableController<R: EntryRepository> {
    repository: R,
    settings: Settings,
    entries: Vec<Entry>,
    index: ReplacementIndex,
    selected: BTreeSet<usize>,
    navigator: SearchNavigator,
    dirty: bool,
}

impl<R: EntryRepository> TableController<R> {
    /// Create an empty controller. Call [`reload`](Self::reload) to read the store.
    pub fn new(repository: R, settings: Settings) -> Self {
        Self {
            repository,
            settings,
            entries: vec![Entry::placeholder()],
            index: ReplacementIndex::default(),
            selected: BTreeSet::new(),
            navigator: SearchNavigator::new(),
            dirty: false,
        }
    }

    /// Create a controller and load the persisted table
    pub fn open(repository: R, settings: Settings) -> Result<Self> {
        let mut table = Self::new(repository, settings);
        table.reload()?;
        Ok(table)
    }

    pub fn into_shared(self) -> SharedTable<R> {
        Arc::new(Mutex::new(self))
    }

    /// Re-read the persisted table, most used entries first.
    ///
    /// The index is built in file order before sorting, so among duplicate
    /// triggers the last one read wins. A missing store yields an empty
    /// table. On error the current state is left untouched. Returns the
    /// number of entries loaded.
    pub fn reload(&mut self) -> Result<usize> {
        let mut entries = self.repository.load()?.unwrap_or_default();
        self.index = ReplacementIndex::build(&entries);
        entries.sort_by(|a, b| b.usage_counter.cmp(&a.usage_counter));

        let count = entries.len();
        self.entries = entries;
        self.ensure_placeholder();
        self.selected.clear();
        self.navigator.invalidate();
        self.dirty = false;

        crate::info!("Replacement table loaded with {} entries", count);
        Ok(count)
    }

    /// Persist the table and rebuild the index.
    ///
    /// Rows are written in table order, which becomes the new file order for
    /// duplicate resolution. On failure the dirty flag stays set so the save can be retried.
    #[must_use = "this returns a Result that should be handled"]
    pub fn save(&mut self) -> Result<()> {
        let entries = self.get_persistable_entries();
        if let Err(e) = self.repository.save(&entries) {
            crate::error!("Failed to save replacement table: {}", e);
            return Err(e);
        }
        self.index = ReplacementIndex::build(&entries);
        self.dirty = false;
        Ok(())
    }

    /// Save only when something changed. Returns whether a write happened.
    #[must_use = "this returns a Result that should be handled"]
    pub fn save_if_dirty(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Every row except blank ones (placeholder included)
    pub fn get_persistable_entries(&self) -> Vec<Entry> {
        self.entries.iter().filter(|e| !e.is_blank()).cloned().collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Number of rows, placeholder included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when only the placeholder row is present
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Entry::is_placeholder)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_counter_enabled(&mut self, enabled: bool) {
        self.settings.counter_enabled = enabled;
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // ---- edits ----

    /// Set the misspelling field (markers allowed) of a row.
    /// Returns the row's position afterwards.
    pub fn set_misspelling(&mut self, position: usize, field: &str) -> Result<usize> {
        self.edit(position, |entry| entry.set_misspelling(field))
    }

    /// Set the correction field (markers allowed) of a row.
    /// Returns the row's position afterwards.
    pub fn set_correction(&mut self, position: usize, field: &str) -> Result<usize> {
        self.edit(position, |entry| entry.set_correction(field))
    }

    /// Set the always-on flag of a row.
    ///
    /// On the placeholder the flag is kept as a preset for the rule being
    /// typed: the row stays at 0 until a text field is filled, then carries
    /// the flag to position 1 while a default placeholder takes its place.
    pub fn set_always_on(&mut self, position: usize, always_on: bool) -> Result<usize> {
        self.edit(position, |entry| entry.always_on = always_on)
    }

    fn edit(&mut self, position: usize, apply: impl FnOnce(&mut Entry)) -> Result<usize> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(position)
            .ok_or(ReplacementError::PositionOutOfRange { position, len })?;
        apply(entry);
        self.dirty = true;

        if position == 0 && self.ensure_placeholder() {
            return Ok(1);
        }
        Ok(position)
    }

    /// Put a fresh placeholder at position 0 if it is missing.
    /// Returns whether rows were shifted.
    fn ensure_placeholder(&mut self) -> bool {
        if self.entries.first().is_some_and(Entry::is_placeholder) {
            return false;
        }
        self.entries.insert(0, Entry::placeholder());
        self.selected = self.selected.iter().map(|p| p + 1).collect();
        self.navigator.invalidate();
        true
    }

    // ---- selection ----

    pub fn set_selected(&mut self, position: usize, selected: bool) {
        if selected && position < self.entries.len() {
            self.selected.insert(position);
        } else {
            self.selected.remove(&position);
        }
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.selected.contains(&position)
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selected_positions(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    // ---- deletion ----

    /// Remove rows at `positions`. Out-of-range positions are ignored.
    /// Returns how many rows were removed.
    pub fn delete<I>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let positions: BTreeSet<usize> = positions.into_iter().collect();
        if positions.is_empty() {
            return 0;
        }

        let mut removed = 0;
        // Highest first so earlier removals do not shift later ones
        for &position in positions.iter().rev() {
            if position < self.entries.len() {
                self.entries.remove(position);
                removed += 1;
            }
        }

        self.selected.clear();
        self.navigator.invalidate();
        self.ensure_placeholder();
        self.dirty = true;
        crate::debug!("Deleted {} replacement rows", removed);
        removed
    }

    /// Remove the selected rows and clear the selection
    pub fn delete_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selected);
        self.delete(selected)
    }

    /// Rows that [`delete_where_unused`](Self::delete_where_unused) would remove
    pub fn count_unused(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.is_placeholder() && e.usage_counter == 0)
            .count()
    }

    /// Remove every row whose counter is 0, keeping the placeholder.
    /// Remaining rows keep their relative order.
    pub fn delete_where_unused(&mut self) -> usize {
        let removed = self.count_unused();
        if removed == 0 {
            return 0;
        }

        let placeholder = self.entries.first().filter(|e| e.is_placeholder()).cloned();
        self.entries.retain(|e| e.usage_counter > 0 && !e.is_placeholder());
        if let Some(placeholder) = placeholder {
            self.entries.insert(0, placeholder);
        }
        self.selected.clear();
        self.navigator.invalidate();
        self.ensure_placeholder();
        self.dirty = true;
        crate::info!("Deleted {} unused replacements", removed);
        removed
    }

    /// Remove every row, leaving only the placeholder
    pub fn delete_all(&mut self) {
        self.entries = vec![Entry::placeholder()];
        self.selected.clear();
        self.navigator.invalidate();
        self.dirty = true;
    }

    // ---- counters ----

    pub fn clear_all_counters(&mut self) {
        for entry in &mut self.entries {
            entry.usage_counter = 0;
        }
        self.dirty = true;
    }

    /// Count one accepted correction for `word`.
    ///
    /// Reads the persisted table, increments the entry `word` resolves to
    /// (last duplicate wins, as in the index), writes the whole table back
    /// and rebuilds the index. The live row holding that same entry gets the
    /// same increment so a later save keeps it. Returns `Ok(false)` when
    /// counting is off or nothing matches.
    #[must_use = "this returns a Result that should be handled"]
    pub fn record_usage(&mut self, word: &str) -> Result<bool> {
        if !self.settings.counter_enabled || word.is_empty() {
            return Ok(false);
        }

        let mut persisted = self.repository.load()?.unwrap_or_default();
        let Some(position) = resolve_position(&persisted, word) else {
            crate::debug!("No replacement entry for '{}', counter unchanged", word);
            return Ok(false);
        };
        let counted = persisted[position].clone();
        persisted[position].increment_counter();
        self.repository.save(&persisted)?;
        self.index = ReplacementIndex::build(&persisted);

        if let Some(live) = self.entries.iter_mut().find(|e| **e == counted) {
            live.increment_counter();
        }

        crate::debug!(
            "Recorded usage for '{}' (now {})",
            word,
            persisted[position].usage_counter
        );
        Ok(true)
    }

    // ---- lookup ----

    pub fn index(&self) -> &ReplacementIndex {
        &self.index
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.index.lookup(word)
    }

    pub fn is_always_on(&self, word: &str) -> bool {
        self.index.is_always_on(word)
    }

    pub fn suggest(&self, text_before_cursor: &str) -> Option<Suggestion> {
        self.index.suggest(text_before_cursor)
    }

    // ---- search ----

    pub fn search(&mut self, query: &str) -> &[usize] {
        self.navigator.search(&self.entries, query)
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.navigator.set_query(query);
    }

    pub fn find_next(&mut self) -> Option<usize> {
        self.navigator.next(&self.entries)
    }

    pub fn find_previous(&mut self) -> Option<usize> {
        self.navigator.previous(&self.entries)
    }

    pub fn search_status(&self) -> Option<(usize, usize)> {
        self.navigator.status()
    }

    // ---- import / export ----

    /// Replace the whole table with imported entries and persist it.
    ///
    /// # Errors
    /// `EmptyImport` when no entry has a misspelling; the table is unchanged.
    #[must_use = "this returns a Result that should be handled"]
    pub fn replace_all(&mut self, imported: Vec<Entry>) -> Result<usize> {
        let imported: Vec<Entry> = imported.into_iter().filter(Entry::is_persistable).collect();
        if imported.is_empty() {
            return Err(ReplacementError::EmptyImport);
        }

        self.repository.save(&imported)?;
        self.index = ReplacementIndex::build(&imported);
        let count = imported.len();
        self.entries = imported;
        self.ensure_placeholder();
        self.selected.clear();
        self.navigator.invalidate();
        self.dirty = false;

        crate::info!("Imported {} replacements", count);
        Ok(count)
    }

    /// Write the current table to a timestamped CSV in `dir`
    pub fn export_to(&self, dir: &std::path::Path) -> Result<std::path::PathBuf> {
        store::export_file(
            dir,
            &self.get_persistable_entries(),
            self.settings.counter_enabled,
        )
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
