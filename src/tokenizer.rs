//! Word extraction from the text preceding the cursor.
//!
//! The keyboard hands over everything typed before the cursor; these helpers
//! find the word the user just finished, optionally together with a single
//! trailing punctuation mark.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Punctuation captured after a word. Only one character is ever taken.
pub const TRAILING_PUNCTUATION: [char; 14] = [
    '.', ',', '!', ';', ':', '?', '"', '\'', '(', ')', '/', '\\', '[', ']',
];

/// A word and the punctuation typed right after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordWithPunctuation<'a> {
    pub word: &'a str,
    /// Empty when the word was not followed by recognized punctuation
    pub punctuation: &'a str,
}

/// Letters (any case, modifier and other) and decimal digits.
#[inline]
pub fn is_letter_or_digit(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// Last word before the cursor, ignoring trailing whitespace and punctuation.
pub fn extract_last_word(text_before_cursor: &str) -> Option<&str> {
    last_word(text_before_cursor.trim_end())
}

/// Last word before the cursor plus one trailing punctuation character.
///
/// Returns `None` when there is no word, even if punctuation was found.
pub fn extract_last_word_with_punctuation(text_before_cursor: &str) -> Option<WordWithPunctuation<'_>> {
    let text = text_before_cursor.trim_end();

    let (body, punctuation) = match text.chars().next_back() {
        Some(ch) if TRAILING_PUNCTUATION.contains(&ch) => text.split_at(text.len() - ch.len_utf8()),
        _ => (text, ""),
    };

    let word = last_word(body)?;
    Some(WordWithPunctuation { word, punctuation })
}

fn last_word(text: &str) -> Option<&str> {
    let (last, ch) = text
        .char_indices()
        .rev()
        .find(|&(_, ch)| is_letter_or_digit(ch))?;
    let end = last + ch.len_utf8();

    let start = text[..end]
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| is_letter_or_digit(ch))
        .last()
        .map_or(last, |(i, _)| i);

    Some(&text[start..end])
}

#[cfg(test)]
#[path = "tokenizer_test.rs"]
mod tests;
