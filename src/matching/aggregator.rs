//! Aggregator: combines the six per-field comparisons into an absolute
//! score, two reachability denominators, and the final "automatically
//! matched" verdict.

use crate::matching::dates;
use crate::matching::multivalue::{self, MultiValueResult};
use crate::matching::tokenize::tokenize;
use crate::models::report::{ComputedField, FieldOperands, FieldResult, MatchReport};
use crate::models::record::{DisregardSet, PersonRecord};

pub const ALGORITHM_VERSION: &str = "2.7";
const ABSOLUTE_SCORE_GATE: f64 = 60.0;
const PERFECT_RELATIVE_SCORE_GATE: f64 = 50.0;

const FORENAME_MAX: f64 = 25.0;
const SURNAME_MAX: f64 = 25.0;
const BIRTH_PLACE_MAX: f64 = 10.0;
const BIRTH_DATE_MAX: f64 = 20.0;
const DEATH_PLACE_MAX: f64 = 10.0;
const DEATH_DATE_MAX: f64 = 10.0;

const NOT_COMPARED_EMPTY_TOKENS: &str = "no comparable tokens after filtering";
const NOT_COMPARED_ONE_SIDED: &str = "present on only one side";

struct Accumulated {
    result: FieldResult,
    absolute: f64,
    max_reachable: f64,
    max_total_reachable: f64,
}

fn present(values: &Option<Vec<String>>) -> bool {
    matches!(values, Some(v) if !v.is_empty())
}

fn empty_vec() -> Vec<String> {
    Vec::new()
}

/// A name/place field: forenames, surnames, birth_place, death_place.
#[allow(clippy::too_many_arguments)]
fn compare_name_field(
    local: &Option<Vec<String>>,
    external: &Option<Vec<String>>,
    disregard: &[String],
    is_surname: bool,
    shortform_allowed: bool,
    is_place: bool,
    max_score: f64,
) -> Accumulated {
    let local_present = present(local);
    let external_present = present(external);

    if !local_present && !external_present {
        return Accumulated {
            result: FieldResult::Absent,
            absolute: 0.0,
            max_reachable: 0.0,
            max_total_reachable: 0.0,
        };
    }

    let local_values = local.as_ref().map(Vec::as_slice).unwrap_or(&[]);
    let external_values = external.as_ref().map(Vec::as_slice).unwrap_or(&[]);
    let local_bag = tokenize(local_values, is_surname);
    let external_bag = tokenize(external_values, is_surname);
    let disregard_bag = tokenize(disregard, is_surname);

    if local_present && external_present {
        if local_bag.is_empty() || external_bag.is_empty() {
            return Accumulated {
                result: FieldResult::NotCompared {
                    info: NOT_COMPARED_EMPTY_TOKENS.to_string(),
                },
                absolute: 0.0,
                max_reachable: 0.0,
                max_total_reachable: 0.0,
            };
        }

        let MultiValueResult {
            score,
            smaller_side_score,
            larger_side_score,
            ..
        } = multivalue::compare(&local_bag, &external_bag, &disregard_bag, shortform_allowed);

        // Place fields use the smaller-side score directly: place strings
        // commonly differ in verbosity ("München" vs. "München / Bayern
        // / Deutsches Reich"), and the composite formula would otherwise
        // penalize that extra detail on the larger side.
        let effective_score = if is_place { smaller_side_score } else { score };

        let computed = ComputedField {
            score: effective_score,
            absolute_score: effective_score * max_score,
            max_absolute_score: max_score,
            smaller_side_score,
            larger_side_score,
            operands: FieldOperands::Names {
                local: local_bag,
                external: external_bag,
                disregard: if disregard_bag.is_empty() {
                    None
                } else {
                    Some(disregard_bag)
                },
            },
            info: None,
        };

        Accumulated {
            result: FieldResult::Computed(computed),
            absolute: effective_score * max_score,
            max_reachable: max_score,
            max_total_reachable: max_score,
        }
    } else {
        let present_bag = if local_present { &local_bag } else { &external_bag };
        if present_bag.is_empty() {
            Accumulated {
                result: FieldResult::NotCompared {
                    info: NOT_COMPARED_EMPTY_TOKENS.to_string(),
                },
                absolute: 0.0,
                max_reachable: 0.0,
                max_total_reachable: 0.0,
            }
        } else {
            Accumulated {
                result: FieldResult::NotCompared {
                    info: NOT_COMPARED_ONE_SIDED.to_string(),
                },
                absolute: 0.0,
                max_reachable: 0.0,
                max_total_reachable: max_score,
            }
        }
    }
}

fn compare_date_field(
    local: &Option<Vec<String>>,
    external: &Option<Vec<String>>,
    max_score: f64,
) -> Accumulated {
    let local_present = present(local);
    let external_present = present(external);

    if !local_present && !external_present {
        return Accumulated {
            result: FieldResult::Absent,
            absolute: 0.0,
            max_reachable: 0.0,
            max_total_reachable: 0.0,
        };
    }

    if !(local_present && external_present) {
        return Accumulated {
            result: FieldResult::NotCompared {
                info: NOT_COMPARED_ONE_SIDED.to_string(),
            },
            absolute: 0.0,
            max_reachable: 0.0,
            max_total_reachable: max_score,
        };
    }

    let local_values = local.clone().unwrap_or_else(empty_vec);
    let external_values = external.clone().unwrap_or_else(empty_vec);
    let (score, info) = dates::compare(&local_values, &external_values);

    let computed = ComputedField {
        score,
        absolute_score: score * max_score,
        max_absolute_score: max_score,
        smaller_side_score: score,
        larger_side_score: score,
        operands: FieldOperands::Dates {
            local: local_values,
            external: external_values,
        },
        info,
    };

    Accumulated {
        result: FieldResult::Computed(computed),
        absolute: score * max_score,
        max_reachable: max_score,
        max_total_reachable: max_score,
    }
}

/// Run the full pipeline for two records and a disregard set, producing
/// a `MatchReport`.
#[tracing::instrument(skip_all)]
pub fn aggregate(local: &PersonRecord, external: &PersonRecord, disregard: &DisregardSet) -> MatchReport {
    let forenames = compare_name_field(
        &local.forenames,
        &external.forenames,
        &disregard.forenames,
        false,
        true,
        false,
        FORENAME_MAX,
    );
    let surnames = compare_name_field(
        &local.surnames,
        &external.surnames,
        &disregard.surnames,
        true,
        false,
        false,
        SURNAME_MAX,
    );
    let birth_place = compare_name_field(
        &local.birth_place,
        &external.birth_place,
        &disregard.birth_place,
        false,
        true,
        true,
        BIRTH_PLACE_MAX,
    );
    let death_place = compare_name_field(
        &local.death_place,
        &external.death_place,
        &disregard.death_place,
        false,
        true,
        true,
        DEATH_PLACE_MAX,
    );
    let birth_date = compare_date_field(&local.birth_date, &external.birth_date, BIRTH_DATE_MAX);
    let death_date = compare_date_field(&local.death_date, &external.death_date, DEATH_DATE_MAX);

    let fields = [&forenames, &surnames, &birth_place, &birth_date, &death_place, &death_date];
    let absolute_score: f64 = fields.iter().map(|f| f.absolute).sum();
    let max_score_reachable: f64 = fields.iter().map(|f| f.max_reachable).sum();
    let max_total_score_reachable: f64 = fields.iter().map(|f| f.max_total_reachable).sum();

    let relative_score = if max_score_reachable > 0.0 {
        absolute_score / max_score_reachable
    } else {
        0.0
    };
    let total_relative_score = if max_total_score_reachable > 0.0 {
        absolute_score / max_total_score_reachable
    } else {
        0.0
    };

    let automatically_matched = absolute_score >= ABSOLUTE_SCORE_GATE
        || (total_relative_score >= 1.0 && absolute_score >= PERFECT_RELATIVE_SCORE_GATE);

    MatchReport {
        forenames: forenames.result,
        surnames: surnames.result,
        birth_place: birth_place.result,
        birth_date: birth_date.result,
        death_place: death_place.result,
        death_date: death_date.result,
        absolute_score,
        relative_score,
        total_relative_score,
        max_score_reachable,
        max_total_score_reachable,
        automatically_matched,
        matching_algorithm_version: ALGORITHM_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(forenames: &[&str], surnames: &[&str], birth_date: &str) -> PersonRecord {
        PersonRecord {
            forenames: Some(forenames.iter().map(|s| s.to_string()).collect()),
            surnames: Some(surnames.iter().map(|s| s.to_string()).collect()),
            birth_place: None,
            birth_date: Some(vec![birth_date.to_string()]),
            death_place: None,
            death_date: None,
        }
    }

    #[test]
    fn s1_identical_record_reaches_gate() {
        let local = record(&["Anna"], &["Musterfrau"], "1910-05-12");
        let external = record(&["Anna"], &["Musterfrau"], "1910-05-12");
        let report = aggregate(&local, &external, &DisregardSet::default());
        assert!((report.absolute_score - 70.0).abs() < 1e-6, "{}", report.absolute_score);
        assert!((report.relative_score - 1.0).abs() < 1e-6);
        assert!(report.automatically_matched);
    }

    #[test]
    fn s2_day_month_swap_still_matches() {
        let local = record(&["Anna"], &["Musterfrau"], "1910-05-12");
        let external = record(&["Anna"], &["Musterfrau"], "1910-12-05");
        let report = aggregate(&local, &external, &DisregardSet::default());
        assert!(report.automatically_matched);
    }

    #[test]
    fn s5_threshold_excludes_and_typically_fails_match() {
        let local = PersonRecord {
            birth_date: Some(vec![">1940-01-01".to_string()]),
            ..Default::default()
        };
        let external = PersonRecord {
            birth_date: Some(vec!["1935-06-01".to_string()]),
            ..Default::default()
        };
        let report = aggregate(&local, &external, &DisregardSet::default());
        assert!(!report.automatically_matched);
    }

    #[test]
    fn missing_field_on_one_side_only_raises_total_denominator() {
        let local = PersonRecord {
            forenames: Some(vec!["Anna".to_string()]),
            ..Default::default()
        };
        let external = PersonRecord::default();
        let report = aggregate(&local, &external, &DisregardSet::default());
        assert_eq!(report.absolute_score, 0.0);
        assert_eq!(report.max_score_reachable, 0.0);
        assert!(report.max_total_score_reachable > 0.0);
    }

    #[test]
    fn both_sides_missing_contributes_nothing() {
        let local = PersonRecord::default();
        let external = PersonRecord::default();
        let report = aggregate(&local, &external, &DisregardSet::default());
        assert_eq!(report.max_total_score_reachable, 0.0);
        assert!(!report.automatically_matched);
    }
}
