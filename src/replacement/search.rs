// Search navigator - exact-match search with cyclic next/previous over the live list

use super::Entry;

/// Positions of entries whose misspelling or correction equals `query`,
/// ignoring case. Fields are compared as displayed, markers included.
pub fn find_matches(entries: &[Entry], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            entry.misspelling_field().to_lowercase() == needle
                || entry.correction_field().to_lowercase() == needle
        })
        .map(|(position, _)| position)
        .collect()
}

/// Steps through the matches for one query term.
///
/// The navigator does not own the list; callers pass the current entries on
/// every call so results always reflect the live table.
#[derive(Debug, Clone, Default)]
pub struct SearchNavigator {
    query: String,
    matches: Vec<usize>,
    /// Index into `matches`
    current: Option<usize>,
    searched: bool,
}

impl SearchNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Change the term without searching yet
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.invalidate();
    }

    /// Forget previous results, keeping the term. Used when the list changes.
    pub fn invalidate(&mut self) {
        self.matches.clear();
        self.current = None;
        self.searched = false;
    }

    /// Search for `query` and move to the first match
    pub fn search(&mut self, entries: &[Entry], query: &str) -> &[usize] {
        self.query = query.trim().to_string();
        self.run(entries);
        if !self.matches.is_empty() {
            self.current = Some(0);
        }
        &self.matches
    }

    /// Move to the following match, wrapping to the first.
    /// Without a prior search this lands on the first match.
    pub fn next(&mut self, entries: &[Entry]) -> Option<usize> {
        self.ensure_searched(entries);
        let total = self.matches.len();
        if total == 0 {
            return None;
        }
        let index = self.current.map_or(0, |i| (i + 1) % total);
        self.current = Some(index);
        Some(self.matches[index])
    }

    /// Move to the preceding match, wrapping to the last.
    /// Without a prior search this lands on the last match.
    pub fn previous(&mut self, entries: &[Entry]) -> Option<usize> {
        self.ensure_searched(entries);
        let total = self.matches.len();
        if total == 0 {
            return None;
        }
        let index = self.current.map_or(total - 1, |i| (i + total - 1) % total);
        self.current = Some(index);
        Some(self.matches[index])
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Entry position of the current match
    pub fn current(&self) -> Option<usize> {
        self.current.map(|i| self.matches[i])
    }

    /// `(current, total)` for an "n of m" display, `current` one-based and
    /// zero before the first step. `None` when there is no query.
    pub fn status(&self) -> Option<(usize, usize)> {
        if self.query.is_empty() {
            return None;
        }
        Some((self.current.map_or(0, |i| i + 1), self.matches.len()))
    }

    fn ensure_searched(&mut self, entries: &[Entry]) {
        if !self.searched || self.matches.is_empty() {
            self.run(entries);
        }
    }

    fn run(&mut self, entries: &[Entry]) {
        self.matches = find_matches(entries, &self.query);
        self.current = None;
        self.searched = true;
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
