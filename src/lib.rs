//! Text replacement engine for software keyboards.
//!
//! The user keeps a table of `misspelling -> correction` rules in a CSV
//! file. The engine loads it, indexes it for per-keystroke lookup of the
//! word before the cursor, and lets an editing surface change, search,
//! import and export it.
//!
//! ```no_run
//! use textreplace::{CsvFileStore, Settings, TableController};
//!
//! let settings = Settings::default();
//! let store = CsvFileStore::from_settings(&settings);
//! let table = TableController::open(store, settings)?;
//! if let Some(hit) = table.suggest("I think teh") {
//!     println!("{} -> {}", hit.word, hit.correction);
//! }
//! # Ok::<(), textreplace::ReplacementError>(())
//! ```

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod replacement;
pub mod tokenizer;
mod util;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use config::Settings;
pub use replacement::{
    CsvFileStore, Entry, EntryRepository, MemoryStore, ReplacementError, ReplacementIndex,
    SearchNavigator, SharedTable, Suggestion, TableController,
};
pub use tokenizer::{extract_last_word, extract_last_word_with_punctuation, WordWithPunctuation};
