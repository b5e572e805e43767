//! Property-name case translation.
//!
//! The remote client names properties in lower camel case
//! (`aMoreComplexProperty`), native models use snake case
//! (`a_more_complex_property`). Both functions only rewrite ASCII letters,
//! digits, `-` and `_`; every other character passes through unchanged.
//!
//! ```
//! use amf_utils::case::{camelize_lower, underscore};
//!
//! assert_eq!(underscore("aMoreComplexProperty"), "a_more_complex_property");
//! assert_eq!(camelize_lower("a_more_complex_property"), "aMoreComplexProperty");
//!
//! // Acronym runs are split before the last capital of the run.
//! assert_eq!(underscore("HTMLParser"), "html_parser");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// underscore

/// Converts a camel case identifier to snake case.
///
/// An underscore is inserted before an uppercase letter when it follows a
/// lowercase letter or a digit, or when it ends an uppercase/digit run and is
/// followed by a lowercase letter. Dashes become underscores and the result is
/// lowercased.
pub fn underscore(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            let after_lower_or_digit = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let ends_upper_run =
                (prev.is_ascii_uppercase() || prev.is_ascii_digit()) && next_is_lower;
            if after_lower_or_digit || ends_upper_run {
                out.push('_');
            }
        }

        match c {
            '-' => out.push('_'),
            _ => out.push(c.to_ascii_lowercase()),
        }
    }

    out
}

// -----------------------------------------------------------------------------
// camelize

/// Converts a snake case identifier to lower camel case.
///
/// The first character is lowercased. An `_` between a lowercase letter or
/// digit and a lowercase letter is dropped and the letter after it is
/// uppercased. Every other `_` is kept, so [`underscore`] restores any
/// identifier made of lowercase letters, digits and `_` that does not start
/// with a digit.
///
/// ```
/// use amf_utils::case::camelize_lower;
///
/// assert_eq!(camelize_lower("item_1_name"), "item_1Name");
/// assert_eq!(camelize_lower("a__b"), "a__b");
/// assert_eq!(camelize_lower("a_b_c"), "aB_c");
/// ```
pub fn camelize_lower(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars().peekable();

    if let Some(first) = chars.next() {
        out.push(first.to_ascii_lowercase());
    }

    while let Some(c) = chars.next() {
        let joins = c == '_'
            && out
                .chars()
                .next_back()
                .is_some_and(|prev| prev.is_ascii_lowercase() || prev.is_ascii_digit())
            && chars.peek().is_some_and(char::is_ascii_lowercase);

        match chars.next_if(|_| joins) {
            Some(next) => out.push(next.to_ascii_uppercase()),
            None => out.push(c),
        }
    }

    out
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{camelize_lower, underscore};

    #[test]
    fn camel_to_snake() {
        assert_eq!(underscore("aProperty"), "a_property");
        assert_eq!(underscore("aMoreComplexProperty"), "a_more_complex_property");
        assert_eq!(underscore("already_snake"), "already_snake");
        assert_eq!(underscore("userID"), "user_id");
        assert_eq!(underscore("HTMLParser"), "html_parser");
        assert_eq!(underscore("version2Name"), "version2_name");
        assert_eq!(underscore("some-dashed"), "some_dashed");
        assert_eq!(underscore(""), "");
    }

    #[test]
    fn snake_to_camel() {
        assert_eq!(camelize_lower("a_property"), "aProperty");
        assert_eq!(camelize_lower("a_more_complex_property"), "aMoreComplexProperty");
        assert_eq!(camelize_lower("id"), "id");
        assert_eq!(camelize_lower("Name"), "name");
        assert_eq!(camelize_lower("version2_name"), "version2Name");
        assert_eq!(camelize_lower(""), "");
    }

    #[test]
    fn underscores_that_cannot_join_are_kept() {
        assert_eq!(camelize_lower("version_2"), "version_2");
        assert_eq!(camelize_lower("item_1_name"), "item_1Name");
        assert_eq!(camelize_lower("a__b"), "a__b");
        assert_eq!(camelize_lower("trailing_"), "trailing_");
        assert_eq!(camelize_lower("_private"), "_private");
        assert_eq!(camelize_lower("a_b_c"), "aB_c");
    }

    #[test]
    fn round_trip() {
        for word in ["aProperty", "aMoreComplexProperty", "name", "version2Name"] {
            assert_eq!(camelize_lower(&underscore(word)), word);
        }
        for word in ["a_property", "a_more_complex_property", "created_at", "version_2"] {
            assert_eq!(underscore(&camelize_lower(word)), word);
        }
    }

    #[test]
    fn snake_identifiers_round_trip() {
        const ALPHABET: [char; 4] = ['a', 'b', '1', '_'];

        let mut layer: Vec<String> = ALPHABET
            .iter()
            .filter(|c| !c.is_ascii_digit())
            .map(|&c| String::from(c))
            .collect();

        for _ in 0..6 {
            for word in &layer {
                assert_eq!(underscore(&camelize_lower(word)), *word, "`{word}`");
            }
            layer = layer
                .iter()
                .flat_map(|word| {
                    ALPHABET.iter().map(move |&c| {
                        let mut next = word.clone();
                        next.push(c);
                        next
                    })
                })
                .collect();
        }
    }

    #[test]
    fn idempotent() {
        let snake = underscore("aMoreComplexProperty");
        assert_eq!(underscore(&snake), snake);

        let camel = camelize_lower("a_more_complex_property");
        assert_eq!(camelize_lower(&camel), camel);
    }
}
