//! Phonetic coder: Double-Metaphone `(primary, alternate)` pairs.
//!
//! Delegates to `rphonetic`'s Double-Metaphone implementation rather than
//! re-deriving the rule table by hand.

use once_cell::sync::Lazy;
use rphonetic::DoubleMetaphone;

static ENCODER: Lazy<DoubleMetaphone> = Lazy::new(DoubleMetaphone::default);

/// Compute the primary and alternate Double-Metaphone codes for a word.
/// Empty input yields two empty codes.
pub fn double_metaphone(word: &str) -> (String, String) {
    if word.is_empty() {
        return (String::new(), String::new());
    }
    let result = ENCODER.double_metaphone(word);
    (result.primary().to_string(), result.alternate().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_codes() {
        assert_eq!(double_metaphone(""), (String::new(), String::new()));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(double_metaphone("schmidt"), double_metaphone("schmidt"));
    }

    #[test]
    fn similar_sounding_names_share_a_code() {
        let (p1, _) = double_metaphone("smith");
        let (p2, _) = double_metaphone("smyth");
        assert_eq!(p1, p2);
    }
}
