// Text replacement module - the user's (misspelling -> correction) table,
// its file format, lookup index and editing controller

mod codec;
mod entry;
mod error;
mod index;
mod search;
mod store;
mod table;

pub use codec::{
    decode, decode_bytes, encode, encode_document, encode_record, escape_field, header,
    parse_record, unescape_field, COUNTER_COLUMN, HEADER, UTF8_BOM,
};
pub use entry::{CaseMode, Correction, Entry, Trigger, TriggerKey, MARKER};
pub use error::{ReplacementError, Result};
pub use index::{
    resolve_position, strip_capitalize_marker, IndexedReplacement, ReplacementIndex, Suggestion,
};
pub use search::{find_matches, SearchNavigator};
pub use store::{
    export_file, export_file_name, import_file, CsvFileStore, EntryRepository, MemoryStore,
    EXPORT_FILE_PREFIX,
};
pub use table::{SharedTable, TableController};
