// Tests for word extraction before the cursor

use super::*;

#[test]
fn test_extract_last_word() {
    assert_eq!(extract_last_word("Hello, world"), Some("world"));
    assert_eq!(extract_last_word("Hello"), Some("Hello"));
    assert_eq!(extract_last_word("teh   "), Some("teh"));
}

#[test]
fn test_extract_last_word_skips_trailing_non_letters() {
    assert_eq!(extract_last_word("what?!  "), Some("what"));
    assert_eq!(extract_last_word("(brb)"), Some("brb"));
    assert_eq!(extract_last_word("it's"), Some("s"));
}

#[test]
fn test_extract_last_word_none_without_letters() {
    assert_eq!(extract_last_word(""), None);
    assert_eq!(extract_last_word("    "), None);
    assert_eq!(extract_last_word("... !?"), None);
}

#[test]
fn test_digits_are_part_of_words() {
    assert_eq!(extract_last_word("see you at 10am"), Some("10am"));
    assert_eq!(extract_last_word("route 66."), Some("66"));
}

#[test]
fn test_unicode_letters_and_digits() {
    assert_eq!(extract_last_word("Grüße"), Some("Grüße"));
    assert_eq!(extract_last_word("これは日本語"), Some("これは日本語"));
    assert_eq!(extract_last_word("число ٣٤"), Some("٣٤"));
    // Non-decimal numerics are not word characters
    assert_eq!(extract_last_word("half½"), Some("half"));
    // Underscores split words
    assert_eq!(extract_last_word("snake_case"), Some("case"));
}

#[test]
fn test_extract_with_punctuation() {
    assert_eq!(
        extract_last_word_with_punctuation("Hello, world."),
        Some(WordWithPunctuation {
            word: "world",
            punctuation: "."
        })
    );
    assert_eq!(
        extract_last_word_with_punctuation("I said teh"),
        Some(WordWithPunctuation {
            word: "teh",
            punctuation: ""
        })
    );
}

#[test]
fn test_trailing_whitespace_is_not_punctuation() {
    assert_eq!(
        extract_last_word_with_punctuation("Hello   "),
        Some(WordWithPunctuation {
            word: "Hello",
            punctuation: ""
        })
    );
    assert_eq!(extract_last_word_with_punctuation("   "), None);
    assert_eq!(extract_last_word_with_punctuation("?"), None);
}

#[test]
fn test_every_recognized_punctuation_mark() {
    for mark in TRAILING_PUNCTUATION {
        let text = format!("teh{}", mark);
        let token = extract_last_word_with_punctuation(&text).unwrap();
        assert_eq!(token.word, "teh");
        assert_eq!(token.punctuation, mark.to_string());
    }
}

#[test]
fn test_only_one_punctuation_character_is_captured() {
    let token = extract_last_word_with_punctuation("really?!").unwrap();
    assert_eq!(token.word, "really");
    assert_eq!(token.punctuation, "!");
}

#[test]
fn test_unrecognized_trailing_symbol_is_not_punctuation() {
    let token = extract_last_word_with_punctuation("teh-").unwrap();
    assert_eq!(token.word, "teh");
    assert_eq!(token.punctuation, "");
}

#[test]
fn test_trailing_whitespace_is_trimmed_before_punctuation() {
    let token = extract_last_word_with_punctuation("teh,   ").unwrap();
    assert_eq!(token.word, "teh");
    assert_eq!(token.punctuation, ",");
}

#[test]
fn test_no_word_means_none_even_with_punctuation() {
    assert_eq!(extract_last_word_with_punctuation("."), None);
    assert_eq!(extract_last_word_with_punctuation("   "), None);
    assert_eq!(extract_last_word_with_punctuation(""), None);
    assert_eq!(extract_last_word_with_punctuation("?? !"), None);
}
