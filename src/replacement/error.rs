// Error types for text replacement operations

/// Error types for replacement table operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReplacementError {
    /// The table exists but could not be read
    #[error("Failed to load replacements: {0}")]
    Load(String),
    /// Failed to persist entries; the previous file is left in place
    #[error("Failed to persist replacements: {0}")]
    Persistence(String),
    /// An edit targeted a row that does not exist
    #[error("Position {position} is out of range for a table of {len} rows")]
    PositionOutOfRange { position: usize, len: usize },
    /// An import produced no usable entries
    #[error("No valid entries found to import")]
    EmptyImport,
    /// An import was attempted on something that is not a CSV document
    #[error("Unsupported import format: {0}")]
    UnsupportedFormat(String),
    /// The settings file could not be read or written
    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ReplacementError>;
