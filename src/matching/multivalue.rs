//! Multi-value matcher: aligns two multisets of tokens with best-partner
//! (min-distance) scoring on both the normalized and original surfaces, a
//! disregard filter, and a cosine-shaped composite.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use strsim::damerau_levenshtein;

use crate::matching::similarity::similarity;
use crate::models::bag::{DisregardBag, NameBag};

/// Distance below which a match is treated as "already near-perfect" for
/// disregard-filtering purposes: the disregard filter never suppresses
/// an entry this good, even if it's also in the disregard bag.
const NEAR_PERFECT_DISTANCE: f64 = 0.001;

pub struct MultiValueResult {
    pub score: f64,
    pub smaller_side_score: f64,
    pub larger_side_score: f64,
    pub size_difference: usize,
}

/// Compare two `NameBag`s, applying `disregard` and the shortform
/// relaxation, and fold the result through the cosine shaping below.
pub fn compare(
    local: &NameBag,
    external: &NameBag,
    disregard: &DisregardBag,
    shortform_allowed: bool,
) -> MultiValueResult {
    let disregard_normalized: BTreeSet<String> = disregard.keys().cloned().collect();
    let disregard_original: BTreeSet<String> =
        disregard.values().flatten().cloned().collect();

    // `local` is the smaller side whenever its cardinality is less than
    // *or equal to* `external`'s, so a tie leaves `external` labeled
    // "larger".
    let (smaller, larger) = if local.len() <= external.len() {
        (local, external)
    } else {
        (external, local)
    };

    let smaller_score = side_score(
        smaller,
        larger,
        &disregard_normalized,
        &disregard_original,
        shortform_allowed,
    );
    let larger_score = side_score(
        larger,
        smaller,
        &disregard_normalized,
        &disregard_original,
        shortform_allowed,
    );

    let score = if local.len() == external.len() {
        (smaller_score + larger_score) / 2.0
    } else {
        (4.0 * smaller_score + larger_score) / 5.0
    };

    MultiValueResult {
        score,
        smaller_side_score: smaller_score,
        larger_side_score: larger_score,
        size_difference: local.len().abs_diff(external.len()),
    }
}

/// Best-partner distances for every token on `side` against `opposite`,
/// on both the normalized-key surface and the original-spelling surface,
/// filtered through the disregard bag, then folded into one side score.
fn side_score(
    side: &NameBag,
    opposite: &NameBag,
    disregard_normalized: &BTreeSet<String>,
    disregard_original: &BTreeSet<String>,
    shortform_allowed: bool,
) -> f64 {
    let normalized_keys: Vec<String> = side.keys().cloned().collect();
    let opposite_normalized: Vec<String> = opposite.keys().cloned().collect();
    let normalized_distances: Vec<f64> = normalized_keys
        .iter()
        .map(|key| best_match_distance(key, &opposite_normalized, shortform_allowed))
        .collect();
    let (_, normalized_distances) =
        apply_disregard_filter(&normalized_keys, &normalized_distances, disregard_normalized);

    let original_keys: Vec<String> = side.values().flatten().cloned().collect();
    let opposite_original: Vec<String> = opposite.values().flatten().cloned().collect();
    let original_distances: Vec<f64> = original_keys
        .iter()
        .map(|key| best_match_distance(key, &opposite_original, shortform_allowed))
        .collect();
    let (_, original_distances) =
        apply_disregard_filter(&original_keys, &original_distances, disregard_original);

    let (mean_n, max_n) = mean_and_max(&normalized_distances);
    let (mean_o, max_o) = mean_and_max(&original_distances);

    (PI * (8.0 * mean_n + 4.0 * max_n + 2.0 * mean_o + max_o) / 15.0).cos()
}

/// Minimum distance from `token` to any entry in `opposite`, with an
/// early exit when an exact (zero Damerau–Levenshtein distance) match is
/// found — avoids running the full phonetic comparison when a literal
/// match already exists.
fn best_match_distance(token: &str, opposite: &[String], shortform_allowed: bool) -> f64 {
    if opposite.is_empty() {
        return 0.0;
    }
    if opposite.iter().any(|other| damerau_levenshtein(token, other) == 0) {
        return 0.0;
    }
    let mut best = f64::INFINITY;
    for other in opposite {
        let distance = similarity(token, other, shortform_allowed);
        if distance < best {
            best = distance;
        }
        if best <= 0.0 {
            break;
        }
    }
    best
}

/// Drop disregard-listed entries unless doing so would empty the side
/// entirely, or the entry is already a near-perfect match.
fn apply_disregard_filter(
    keys: &[String],
    distances: &[f64],
    disregard: &BTreeSet<String>,
) -> (Vec<String>, Vec<f64>) {
    let disregard_count = keys.iter().filter(|k| disregard.contains(*k)).count();
    if disregard_count == 0 || disregard_count == keys.len() {
        return (keys.to_vec(), distances.to_vec());
    }

    let mut kept_keys = Vec::with_capacity(keys.len());
    let mut kept_distances = Vec::with_capacity(distances.len());
    for (key, distance) in keys.iter().zip(distances.iter()) {
        let is_disregard = disregard.contains(key);
        let near_perfect = *distance <= NEAR_PERFECT_DISTANCE;
        if is_disregard && !near_perfect {
            continue;
        }
        kept_keys.push(key.clone());
        kept_distances.push(*distance);
    }
    (kept_keys, kept_distances)
}

fn mean_and_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let sum: f64 = values.iter().sum();
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    (sum / values.len() as f64, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(entries: &[(&str, &[&str])]) -> NameBag {
        entries
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn identical_bags_score_near_one() {
        let local = bag(&[("anna", &["Anna"])]);
        let external = bag(&[("anna", &["Anna"])]);
        let result = compare(&local, &external, &DisregardBag::new(), true);
        assert!(result.score > 0.99, "score was {}", result.score);
    }

    #[test]
    fn disregard_entry_not_present_leaves_score_unchanged() {
        let local = bag(&[("anna", &["Anna"])]);
        let external = bag(&[("anna", &["Anna"])]);
        let with_disregard = bag(&[("someone_else", &["Someone"])]);
        let baseline = compare(&local, &external, &DisregardBag::new(), true).score;
        let with = compare(&local, &external, &with_disregard, true).score;
        assert!((baseline - with).abs() < 1e-9);
    }

    #[test]
    fn disregard_never_empties_a_side() {
        let local = bag(&[("israel", &["Israel"])]);
        let external = bag(&[("schmidt", &["Schmidt"])]);
        let mut disregard = DisregardBag::new();
        disregard.insert("israel".to_string(), vec!["Israel".to_string()]);
        // Should not panic or divide by zero even though the only local
        // token is disregard-listed.
        let result = compare(&local, &external, &disregard, true);
        assert!(result.score.is_finite());
    }

    #[test]
    fn equal_cardinality_tie_break_labels_external_as_larger() {
        let local = bag(&[("anna", &["Anna"])]);
        let external = bag(&[("zzyzx", &["Zzyzx"])]);
        let result = compare(&local, &external, &DisregardBag::new(), true);
        // Same cardinality on both sides: `local`'s own best-partner
        // score must be the one reported as `smaller_side_score`.
        let local_alone = side_score(
            &local,
            &external,
            &BTreeSet::new(),
            &BTreeSet::new(),
            true,
        );
        assert!((result.smaller_side_score - local_alone).abs() < 1e-9);
    }
}
