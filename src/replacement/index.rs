// Replacement index - answers "what does this word turn into" for the keyboard
// Two tiers: exact-case triggers (stored with `^`) win over case-insensitive ones

use std::collections::HashMap;

use super::entry::{TriggerKey, MARKER};
use super::Entry;
use crate::tokenizer::extract_last_word_with_punctuation;

/// Drop a leading capitalization marker from a correction.
///
/// A marked correction should be inserted exactly as written; the caller
/// must not re-case it. Unmarked input is returned unchanged.
pub fn strip_capitalize_marker(correction: &str) -> &str {
    correction.strip_prefix(MARKER).unwrap_or(correction)
}

/// What a matched trigger resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedReplacement {
    /// Correction field as persisted, marker included
    pub correction: String,
    pub always_on: bool,
}

impl IndexedReplacement {
    /// Text to insert, marker removed
    pub fn text(&self) -> &str {
        strip_capitalize_marker(&self.correction)
    }

    /// Whether the caller should skip auto-capitalization
    pub fn is_verbatim(&self) -> bool {
        self.correction.starts_with(MARKER)
    }
}

/// A correction offered for the word before the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    /// Single trailing punctuation character, or empty
    pub punctuation: String,
    /// Correction field as persisted, marker included
    pub correction: String,
    pub always_on: bool,
}

/// Lookup structure built from a list of entries.
///
/// Holds no reference back to storage; rebuild it whenever entries change.
#[derive(Debug, Clone, Default)]
pub struct ReplacementIndex {
    exact: HashMap<String, IndexedReplacement>,
    insensitive: HashMap<String, IndexedReplacement>,
}

impl ReplacementIndex {
    /// Build the index. Blank triggers are skipped and later duplicates
    /// replace earlier ones.
    pub fn build(entries: &[Entry]) -> Self {
        let mut index = Self::default();

        for entry in entries {
            let Some(key) = entry.trigger.key() else {
                continue;
            };
            let replacement = IndexedReplacement {
                correction: entry.correction_field().trim().to_string(),
                always_on: entry.always_on,
            };
            match key {
                TriggerKey::Exact(key) => index.exact.insert(key, replacement),
                TriggerKey::Insensitive(key) => index.insensitive.insert(key, replacement),
            };
        }

        crate::debug!(
            "Built replacement index: {} exact-case, {} case-insensitive",
            index.exact.len(),
            index.insensitive.len()
        );
        index
    }

    /// Resolve a typed word, exact-case entries first
    pub fn resolve(&self, word: &str) -> Option<&IndexedReplacement> {
        if word.is_empty() {
            return None;
        }
        if let Some(hit) = self.exact.get(word) {
            crate::trace!("Exact-case replacement for '{}'", word);
            return Some(hit);
        }
        self.insensitive.get(&word.to_lowercase())
    }

    /// Correction field for a word, marker preserved
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.resolve(word).map(|hit| hit.correction.as_str())
    }

    pub fn is_always_on(&self, word: &str) -> bool {
        self.resolve(word).is_some_and(|hit| hit.always_on)
    }

    /// Tokenize the text before the cursor and look up its last word
    pub fn suggest(&self, text_before_cursor: &str) -> Option<Suggestion> {
        let token = extract_last_word_with_punctuation(text_before_cursor)?;
        let hit = self.resolve(token.word)?;
        Some(Suggestion {
            word: token.word.to_string(),
            punctuation: token.punctuation.to_string(),
            correction: hit.correction.clone(),
            always_on: hit.always_on,
        })
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.insensitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.insensitive.is_empty()
    }
}

/// Position of the entry a word resolves to, using the same two tiers and
/// last-write-wins rule as [`ReplacementIndex`].
pub fn resolve_position(entries: &[Entry], word: &str) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    let keys: Vec<Option<TriggerKey>> = entries.iter().map(|e| e.trigger.key()).collect();

    keys.iter()
        .rposition(|key| matches!(key, Some(k @ TriggerKey::Exact(_)) if k.matches(word)))
        .or_else(|| {
            keys.iter().rposition(
                |key| matches!(key, Some(k @ TriggerKey::Insensitive(_)) if k.matches(word)),
            )
        })
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
