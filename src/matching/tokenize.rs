//! Tokenizer: splits raw field values into `Token`s and groups them into
//! a `NameBag`.

use crate::matching::normalize::normalize;
use crate::matching::transliterate::transliterate;
use crate::models::bag::{insert_token, NameBag, Token};

const SPLIT_CHARS: [char; 5] = [';', ',', '/', '-', ' '];
const DELETE_CHARS: [char; 3] = [':', '(', ')'];

/// Split one raw string into candidate substrings on `; , / - ` after
/// deleting `: ( )`.
fn split_string_values(value: &str) -> Vec<String> {
    let cleaned: String = value.chars().filter(|c| !DELETE_CHARS.contains(c)).collect();
    cleaned
        .split(|c: char| SPLIT_CHARS.contains(&c))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Drop acronyms: single-character tokens, and two-character tokens
/// ending in `.`.
fn is_acronym(raw: &str) -> bool {
    let len = raw.chars().count();
    len == 1 || (len == 2 && raw.ends_with('.'))
}

/// Build a `NameBag` from one or more raw field strings. `is_surname`
/// selects the surname-specific normalization rules.
pub fn tokenize(values: &[String], is_surname: bool) -> NameBag {
    let mut bag = NameBag::new();
    for raw in values {
        for piece in split_string_values(raw) {
            if is_acronym(&piece) {
                continue;
            }
            let transliterated = transliterate(&piece);
            let normalized = normalize(&transliterated, is_surname);
            insert_token(
                &mut bag,
                Token {
                    original: piece,
                    normalized,
                },
            );
        }
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_separators_and_deletes_brackets() {
        let pieces = split_string_values("München (Bayern) / Deutsches Reich");
        assert_eq!(pieces, vec!["München", "Bayern", "Deutsches", "Reich"]);
    }

    #[test]
    fn drops_single_letter_and_dotted_two_letter_acronyms() {
        assert!(is_acronym("A"));
        assert!(is_acronym("A."));
        assert!(!is_acronym("An"));
        assert!(!is_acronym("Al"));
    }

    #[test]
    fn tokenize_groups_variants_under_one_normalized_key() {
        let bag = tokenize(&["Müller".to_string(), "Mueller".to_string()], true);
        assert_eq!(bag.len(), 1);
        let originals = bag.values().next().unwrap();
        assert_eq!(originals.len(), 2);
    }

    #[test]
    fn tokenize_drops_acronyms_before_normalizing() {
        let bag = tokenize(&["J.".to_string(), "Robert".to_string()], false);
        assert_eq!(bag.len(), 1);
    }
}
