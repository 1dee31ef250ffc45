//! Shared utilities for the replacement engine.
//!
//! - `fs`: atomic file writes used by the table store and settings

mod fs;

pub use fs::{temp_path_for, write_atomic};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
