// Tests for the CSV codec
// Test cases:
// - Header is skipped, data lines decoded, booleans case-insensitive
// - Quoted fields with commas, quotes and embedded newlines round-trip
// - BOM written on encode, skipped (or tolerated when absent) on decode
// - Malformed records are dropped without aborting the document
// - Counter column optional on both sides

use super::*;
use proptest::prelude::*;

#[test]
fn test_decode_skips_header_and_reads_entries() {
    let doc = "Misspell,Correct,Always on?\nteh,the,false\n^Im,I'm,TRUE\n";
    let entries = decode(doc);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], Entry::new("teh", "the", false));
    assert_eq!(entries[1], Entry::new("^Im", "I'm", true));
}

#[test]
fn test_first_line_is_never_data() {
    // Even when the first line looks like a record it is treated as a header
    let entries = decode("teh,the,false\nadn,and,true\n");

    assert_eq!(entries, vec![Entry::new("adn", "and", true)]);
}

#[test]
fn test_escape_field_quotes_only_when_needed() {
    assert_eq!(escape_field("plain"), "plain");
    assert_eq!(escape_field("a,b"), "\"a,b\"");
    assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    assert_eq!(escape_field(""), "");
}

#[test]
fn test_unescape_field_reverses_escape() {
    for raw in ["plain", "a,b", "say \"hi\"", "two\nlines", "\""] {
        assert_eq!(unescape_field(&escape_field(raw)), raw);
    }
    // Unquoted input passes through untouched
    assert_eq!(unescape_field("no quotes"), "no quotes");
}

#[test]
fn test_parse_record_state_machine() {
    assert_eq!(parse_record("a,b,c"), vec!["a", "b", "c"]);
    assert_eq!(parse_record("\"a,b\",c,true"), vec!["a,b", "c", "true"]);
    assert_eq!(
        parse_record("\"he said \"\"no\"\"\",x,false"),
        vec!["he said \"no\"", "x", "false"]
    );
    assert_eq!(parse_record("a,,false"), vec!["a", "", "false"]);
}

#[test]
fn test_embedded_newline_survives_round_trip() {
    let entries = vec![
        Entry::new("sig", "Best regards,\nAlex", false),
        Entry::new("q", "\"quoted\"", true),
    ];
    let doc = encode(&entries, false);

    assert_eq!(decode(&doc), entries);
}

#[test]
fn test_encode_terminates_every_line() {
    let doc = encode(&[Entry::new("teh", "the", false)], false);
    assert_eq!(doc, "Misspell,Correct,Always on?\nteh,the,false\n");

    let empty = encode(&[], false);
    assert_eq!(empty, "Misspell,Correct,Always on?\n");
}

#[test]
fn test_encode_skips_blank_misspellings() {
    let entries = vec![
        Entry::placeholder(),
        Entry::new("   ", "ignored", false),
        Entry::new("", "orphan", true),
        Entry::new("teh", "the", false),
    ];
    let doc = encode(&entries, false);

    assert_eq!(doc.lines().count(), 2);
    assert!(doc.ends_with("teh,the,false\n"));
}

#[test]
fn test_counter_column() {
    let entries = vec![Entry::new("teh", "the", true).with_counter(7)];
    let doc = encode(&entries, true);

    assert_eq!(doc, "Misspell,Correct,Always on?,Counter\nteh,the,true,7\n");
    assert_eq!(decode(&doc)[0].usage_counter, 7);

    // Missing or garbage counters read as zero
    let decoded = decode("h\na,b,false\nc,d,false,lots\ne,f,false, 4 \n");
    let counters: Vec<u32> = decoded.iter().map(|e| e.usage_counter).collect();
    assert_eq!(counters, vec![0, 0, 4]);
}

#[test]
fn test_document_carries_bom() {
    let bytes = encode_document(&[Entry::new("teh", "the", false)], false);

    assert_eq!(&bytes[..3], &UTF8_BOM);
    assert_eq!(decode_bytes(&bytes), vec![Entry::new("teh", "the", false)]);
}

#[test]
fn test_decode_tolerates_missing_bom() {
    let doc = b"Misspell,Correct,Always on?\nteh,the,false\n";
    assert_eq!(decode_bytes(doc).len(), 1);

    // BOM that survived as a char is also skipped
    let doc = "\u{FEFF}Misspell,Correct,Always on?\nteh,the,false\n";
    assert_eq!(decode(doc).len(), 1);
}

#[test]
fn test_malformed_lines_do_not_abort_decoding() {
    let doc = "Misspell,Correct,Always on?\n\
               only-one-field\n\
               \n\
               ,no misspelling,true\n\
               teh,the,false\n\
               two,fields\n\
               adn,and,true\n";
    let entries = decode(doc);

    assert_eq!(
        entries,
        vec![Entry::new("teh", "the", false), Entry::new("adn", "and", true)]
    );
}

#[test]
fn test_unterminated_quote_is_confined_to_its_line() {
    let doc = "Misspell,Correct,Always on?\n\"broken,the,false\nteh,the,false\n";
    let entries = decode(doc);

    assert_eq!(entries, vec![Entry::new("teh", "the", false)]);
}

#[test]
fn test_crlf_line_endings() {
    let doc = "Misspell,Correct,Always on?\r\nteh,the,true\r\nadn,and,false\r\n";
    let entries = decode(doc);

    assert_eq!(
        entries,
        vec![Entry::new("teh", "the", true), Entry::new("adn", "and", false)]
    );
}

#[test]
fn test_end_to_end_document() {
    let doc = "Misspell,Correct,Always on?\nteh,the,false\n^Im,I'm,true\n";
    let entries = decode(doc);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].trigger.case, crate::replacement::CaseMode::Exact);
    assert!(entries[1].always_on);
}

fn field_strategy() -> impl Strategy<Value = String> {
    // Printable text plus the characters that force quoting
    proptest::string::string_regex("[a-zA-Z0-9 ,\"\n'^.!éß]{0,12}").unwrap()
}

proptest! {
    #[test]
    fn prop_round_trip_preserves_entries(
        rows in proptest::collection::vec(
            (field_strategy(), field_strategy(), any::<bool>(), 0u32..1000),
            0..8,
        )
    ) {
        let entries: Vec<Entry> = rows
            .iter()
            .map(|(m, c, on, n)| Entry::new(m, c, *on).with_counter(*n))
            .filter(|e| e.is_persistable())
            .collect();

        let doc = encode_document(&entries, true);
        prop_assert_eq!(decode_bytes(&doc), entries);
    }
}
