//! Unicode-to-ASCII transliteration.
//!
//! The only component that is locale-sensitive; everything downstream
//! assumes plain ASCII letters and digits.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Any-script-to-Latin, Latin-to-ASCII, NFD, strip non-spacing marks, NFC,
/// lowercase — in that order.
pub fn transliterate(input: &str) -> String {
    let ascii = any_ascii::any_ascii(input);
    let decomposed: String = ascii.nfd().collect();
    let stripped: String = decomposed.chars().filter(|c| !is_combining_mark(*c)).collect();
    let recomposed: String = stripped.nfc().collect();
    recomposed.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_lowercases() {
        assert_eq!(transliterate("München"), "munchen");
        assert_eq!(transliterate("MÜLLER"), "muller");
    }

    #[test]
    fn handles_non_latin_scripts() {
        // any_ascii transliterates Cyrillic to a readable Latin approximation.
        assert_eq!(transliterate("Москва"), "moskva");
    }

    #[test]
    fn is_idempotent_on_already_ascii_input() {
        assert_eq!(transliterate("anna"), "anna");
    }
}
