//! The scoring pipeline: transliteration and normalization feed the
//! tokenizer, which feeds the phonetic coder and pairwise similarity, which
//! feed the multi-value matcher; the date matcher runs independently; the
//! aggregator combines every field into a `MatchReport`.

pub mod aggregator;
pub mod dates;
pub mod multivalue;
pub mod normalize;
pub mod partial_ratio;
pub mod phonetic;
pub mod similarity;
pub mod tokenize;
pub mod transliterate;

use crate::models::{DisregardSet, MatchReport, PersonRecord};

/// Score two records and produce a `MatchReport`.
///
/// `disregard` is the optional "values to be disregarded" structure;
/// when absent, comparisons run with an empty disregard set on every
/// field (i.e. nothing is filtered out).
pub fn score_records(
    local: &PersonRecord,
    external: &PersonRecord,
    disregard: Option<&DisregardSet>,
) -> crate::Result<MatchReport> {
    let owned;
    let disregard = match disregard {
        Some(d) => d,
        None => {
            owned = DisregardSet::default();
            &owned
        }
    };
    Ok(aggregator::aggregate(local, external, disregard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_records_defaults_disregard_set_when_absent() {
        let local = PersonRecord {
            forenames: Some(vec!["Anna".to_string()]),
            ..Default::default()
        };
        let external = PersonRecord {
            forenames: Some(vec!["Anna".to_string()]),
            ..Default::default()
        };
        let report = score_records(&local, &external, None).unwrap();
        assert!(report.absolute_score > 0.0);
    }
}
