// CSV codec - reads and writes the line-oriented replacement table format
//
// Document layout: optional UTF-8 BOM, a header line that is never treated as
// data, then one record per entry: misspelling,correction,always_on[,counter]

use std::borrow::Cow;

use super::Entry;

/// UTF-8 byte-order mark written at the start of every document
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Header line for documents without usage counters
pub const HEADER: &str = "Misspell,Correct,Always on?";

/// Column appended to the header when usage counters are written
pub const COUNTER_COLUMN: &str = "Counter";

/// Quote a field if it contains a separator, a quote or a line break.
/// Interior quotes are doubled.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Reverse of [`escape_field`]: strip surrounding quotes and collapse doubled ones.
pub fn unescape_field(field: &str) -> Cow<'_, str> {
    match field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => Cow::Owned(inner.replace("\"\"", "\"")),
        None => Cow::Borrowed(field),
    }
}

/// Header line for a document, without the trailing line break
pub fn header(with_counter: bool) -> Cow<'static, str> {
    if with_counter {
        Cow::Owned(format!("{},{}", HEADER, COUNTER_COLUMN))
    } else {
        Cow::Borrowed(HEADER)
    }
}

/// Encode one entry as a record, without the trailing line break
pub fn encode_record(entry: &Entry, with_counter: bool) -> String {
    let misspelling = entry.misspelling_field();
    let correction = entry.correction_field();
    let mut record = format!(
        "{},{},{}",
        escape_field(&misspelling),
        escape_field(&correction),
        entry.always_on
    );
    if with_counter {
        record.push(',');
        record.push_str(&entry.usage_counter.to_string());
    }
    record
}

/// Encode entries as a document (header included, no BOM).
///
/// Entries whose misspelling is blank are skipped. Every line, the header
/// included, ends with `\n`.
pub fn encode(entries: &[Entry], with_counter: bool) -> String {
    let mut out = String::new();
    out.push_str(&header(with_counter));
    out.push('\n');

    for entry in entries.iter().filter(|e| e.is_persistable()) {
        out.push_str(&encode_record(entry, with_counter));
        out.push('\n');
    }
    out
}

/// Encode entries as the bytes of a durable document, BOM first
pub fn encode_document(entries: &[Entry], with_counter: bool) -> Vec<u8> {
    let text = encode(entries, with_counter);
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
    bytes.extend_from_slice(&UTF8_BOM);
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Decode a document read as raw bytes.
/// A leading BOM is skipped; invalid UTF-8 is replaced rather than rejected.
pub fn decode_bytes(bytes: &[u8]) -> Vec<Entry> {
    let bytes = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
    decode(&String::from_utf8_lossy(bytes))
}

/// Decode a document. The first record is the header and is skipped.
/// Malformed records degrade to empty entries, which are then dropped.
pub fn decode(text: &str) -> Vec<Entry> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    let mut dropped = 0usize;
    let entries: Vec<Entry> = RecordReader::new(text)
        .skip(1)
        .filter(|fields| !is_blank_record(fields))
        .map(|fields| entry_from_record(&fields))
        .filter(|entry| {
            let keep = entry.is_persistable();
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();

    if dropped > 0 {
        crate::warn!("Dropped {} malformed replacement records", dropped);
    }
    entries
}

/// Split a single record into fields
pub fn parse_record(line: &str) -> Vec<String> {
    match scan_record(line, false) {
        Scan::Complete { fields, .. } => fields,
        Scan::Unterminated => Vec::new(),
    }
}

fn is_blank_record(fields: &[String]) -> bool {
    fields.len() == 1 && fields[0].trim().is_empty()
}

fn entry_from_record(fields: &[String]) -> Entry {
    if fields.len() < 3 {
        return Entry::default();
    }
    let always_on = fields[2].trim().eq_ignore_ascii_case("true");
    let usage_counter = fields
        .get(3)
        .and_then(|field| field.trim().parse::<u32>().ok())
        .unwrap_or(0);

    Entry::new(&fields[0], &fields[1], always_on).with_counter(usage_counter)
}

enum Scan {
    Complete { fields: Vec<String>, consumed: usize },
    /// Input ended inside a quoted field
    Unterminated,
}

/// Scan one record from the start of `input`.
///
/// With `multiline` set, a line break inside quotes is field content and the
/// record continues on the next physical line. Without it every line break
/// ends the record.
fn scan_record(input: &str, multiline: bool) -> Scan {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' if in_quotes && matches!(chars.peek(), Some((_, '"'))) => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            '\r' if (!in_quotes || !multiline) && matches!(chars.peek(), Some((_, '\n'))) => {}
            '\n' if !in_quotes || !multiline => {
                fields.push(field);
                return Scan::Complete {
                    fields,
                    consumed: i + 1,
                };
            }
            _ => field.push(c),
        }
    }

    if in_quotes && multiline {
        return Scan::Unterminated;
    }
    fields.push(field);
    Scan::Complete {
        fields,
        consumed: input.len(),
    }
}

/// Iterates the records of a document
struct RecordReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.text.get(self.pos..).filter(|rest| !rest.is_empty())?;

        match scan_record(rest, true) {
            Scan::Complete { fields, consumed } => {
                self.pos += consumed;
                Some(fields)
            }
            Scan::Unterminated => {
                // An unbalanced quote would swallow the rest of the document;
                // confine the damage to its own line instead.
                let line_end = rest.find('\n').map_or(rest.len(), |i| i + 1);
                crate::warn!(
                    "Unterminated quote in replacement record: {:?}",
                    rest[..line_end].trim_end()
                );
                self.pos += line_end;
                Some(parse_record(&rest[..line_end]))
            }
        }
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
