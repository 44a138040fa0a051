//! Pairwise token similarity: combines Double-Metaphone edit distance with
//! Damerau–Levenshtein distance into a single `[0,1]` *distance* (0 =
//! perfect match), with a shortform-aware relaxation for diminutive
//! forenames ("Alex" vs "Alexander").

use strsim::{damerau_levenshtein, levenshtein};

use crate::matching::partial_ratio::partial_ratio;
use crate::matching::phonetic::double_metaphone;

/// Returns whether the shorter code is a prefix of the longer one — the
/// "one code is a phonetic prefix of the other" relaxation condition.
fn is_phonetic_prefix(code_a: &str, code_b: &str) -> bool {
    let (shorter, longer) = if code_a.len() <= code_b.len() {
        (code_a, code_b)
    } else {
        (code_b, code_a)
    };
    !shorter.is_empty() && longer.starts_with(shorter)
}

/// Compute the similarity *distance* between two tokens, in `[0, 1]`.
pub fn similarity(a: &str, b: &str, shortform_allowed: bool) -> f64 {
    let l = a.chars().count().min(b.chars().count());
    if l == 0 {
        return 0.0;
    }

    let (primary_a, alternate_a) = double_metaphone(a);
    let (primary_b, alternate_b) = double_metaphone(b);

    let mut sim_p = phonetic_code_similarity(&primary_a, &primary_b);
    let mut sim_a = phonetic_code_similarity(&alternate_a, &alternate_b);

    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    let sim_d = 1.0 - (damerau_levenshtein(&lower_a, &lower_b) as f64 / l as f64);
    let sim_d = sim_d.max(0.0);

    if shortform_allowed
        && is_phonetic_prefix(&primary_a, &primary_b)
        && is_phonetic_prefix(&alternate_a, &alternate_b)
    {
        let dm_min_len_primary = primary_a.len().min(primary_b.len());
        let dm_min_len_alternate = alternate_a.len().min(alternate_b.len());
        if dm_min_len_primary <= 2 || dm_min_len_alternate <= 2 {
            if partial_ratio(&lower_a, &lower_b) >= 85.0 {
                sim_p = 1.0;
                sim_a = 1.0;
            }
        } else {
            sim_p = 1.0;
            sim_a = 1.0;
        }
    }

    let m = (sim_p + sim_a) / 2.0;
    if m < 1.0 {
        1.0 - (m + sim_d) / 2.0
    } else {
        1.0 - (3.0 * m + sim_d) / 4.0
    }
}

fn phonetic_code_similarity(code_a: &str, code_b: &str) -> f64 {
    let min_len = code_a.len().min(code_b.len()).max(1);
    let dist = levenshtein(code_a, code_b);
    (1.0 - dist as f64 / min_len as f64).max(0.0)
}
