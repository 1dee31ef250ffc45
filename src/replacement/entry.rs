// Replacement entry - one (misspelling -> correction) rule
// The leading `^` marker of the persisted format is translated to structured
// fields here and nowhere else.

use serde::{Deserialize, Serialize};

/// Reserved leading character in persisted fields.
///
/// On a misspelling it requests exact-case matching, on a correction it asks
/// the caller to insert the text verbatim without auto-capitalization.
pub const MARKER: char = '^';

/// How a trigger is compared against typed words
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    /// Matches regardless of case (no marker)
    #[default]
    Insensitive,
    /// Matches only the exact spelling (stored with a leading `^`)
    Exact,
}

/// Lookup key derived from a trigger
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TriggerKey {
    /// Text after the marker, compared as typed
    Exact(String),
    /// Lowercased text, compared against the lowercased word
    Insensitive(String),
}

impl TriggerKey {
    /// Whether a typed word resolves to this key
    pub fn matches(&self, word: &str) -> bool {
        match self {
            TriggerKey::Exact(key) => key == word,
            TriggerKey::Insensitive(key) => *key == word.to_lowercase(),
        }
    }
}

/// The misspelling side of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Trigger text without the marker
    pub text: String,
    pub case: CaseMode,
}

impl Trigger {
    /// Parse a persisted misspelling field
    pub fn parse(field: &str) -> Self {
        match field.strip_prefix(MARKER) {
            Some(rest) => Self {
                text: rest.to_string(),
                case: CaseMode::Exact,
            },
            None => Self {
                text: field.to_string(),
                case: CaseMode::Insensitive,
            },
        }
    }

    /// Build an exact-case trigger
    pub fn exact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case: CaseMode::Exact,
        }
    }

    /// Render back to the persisted field, marker included
    pub fn to_field(&self) -> String {
        match self.case {
            CaseMode::Exact => format!("{}{}", MARKER, self.text),
            CaseMode::Insensitive => self.text.clone(),
        }
    }

    /// Derive the lookup key, or `None` for a blank trigger.
    ///
    /// The field is trimmed before the marker is inspected, so `" ^Im"` keys
    /// the same as `"^Im"`.
    pub fn key(&self) -> Option<TriggerKey> {
        let field = self.to_field();
        let field = field.trim();
        if field.is_empty() {
            return None;
        }
        Some(match field.strip_prefix(MARKER) {
            Some(rest) => TriggerKey::Exact(rest.to_string()),
            None => TriggerKey::Insensitive(field.to_lowercase()),
        })
    }
}

/// The replacement side of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Replacement text without the marker
    pub text: String,
    /// Insert exactly as written, suppressing auto-capitalization
    pub verbatim: bool,
}

impl Correction {
    /// Parse a persisted correction field
    pub fn parse(field: &str) -> Self {
        match field.strip_prefix(MARKER) {
            Some(rest) => Self {
                text: rest.to_string(),
                verbatim: true,
            },
            None => Self {
                text: field.to_string(),
                verbatim: false,
            },
        }
    }

    /// Render back to the persisted field, marker included
    pub fn to_field(&self) -> String {
        if self.verbatim {
            format!("{}{}", MARKER, self.text)
        } else {
            self.text.clone()
        }
    }
}

/// A single text replacement rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub trigger: Trigger,
    pub correction: Correction,
    /// Apply automatically instead of only offering the correction
    #[serde(default, alias = "always_on")]
    pub always_on: bool,
    /// Times the correction has been accepted
    #[serde(default, alias = "usage_counter")]
    pub usage_counter: u32,
}

impl Entry {
    /// Create an entry from persisted field text (markers allowed)
    pub fn new(misspelling: &str, correction: &str, always_on: bool) -> Self {
        Self {
            trigger: Trigger::parse(misspelling),
            correction: Correction::parse(correction),
            always_on,
            usage_counter: 0,
        }
    }

    pub fn with_counter(mut self, usage_counter: u32) -> Self {
        self.usage_counter = usage_counter;
        self
    }

    /// The empty "type here to add a rule" row
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn misspelling_field(&self) -> String {
        self.trigger.to_field()
    }

    pub fn correction_field(&self) -> String {
        self.correction.to_field()
    }

    pub fn set_misspelling(&mut self, field: &str) {
        self.trigger = Trigger::parse(field);
    }

    pub fn set_correction(&mut self, field: &str) {
        self.correction = Correction::parse(field);
    }

    /// Only entries with a non-blank misspelling reach the durable store
    pub fn is_persistable(&self) -> bool {
        !self.misspelling_field().trim().is_empty()
    }

    /// Both text fields are blank after trimming
    pub fn is_blank(&self) -> bool {
        self.misspelling_field().trim().is_empty() && self.correction_field().trim().is_empty()
    }

    /// Both text fields are literally empty
    pub fn is_placeholder(&self) -> bool {
        self.trigger.text.is_empty()
            && self.trigger.case == CaseMode::Insensitive
            && self.correction.text.is_empty()
            && !self.correction.verbatim
    }

    pub fn increment_counter(&mut self) {
        self.usage_counter = self.usage_counter.saturating_add(1);
    }
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;
