//! Date matching: `YYYY-MM-DD` parsing with fuzzy month/day (`**`)
//! and open-ended `<`/`>` thresholds, compared via combined string-edit
//! and absolute-day-difference metrics.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use strsim::damerau_levenshtein;

use crate::models::date::{DateSet, FuzzyDate, Threshold};

const MONTH_DAY_WEIGHTS: [f64; 5] = [0.0, 0.5, 0.75, 0.0, 0.0];
const MONTH_DAY_MULTIPLIERS: [f64; 5] = [1.0, 6.0, 6.0, 6.0, 6.0];
const YEAR_WEIGHTS: [f64; 2] = [0.0, 0.75];
const YEAR_MULTIPLIERS: [f64; 2] = [1.0, 2.0];
const TIMEDELTA_TIE_BREAK_DIVISOR: f64 = 100.0 * 356.0;

const COULD_NOT_COMPARE: &str = "Could not compare";

/// Parse one `YYYY-MM-DD`-shaped string. Requires exactly 3 `-`-separated
/// components: year 4-5 chars (including an optional leading `<`/`>`),
/// month and day 2 chars each (digits or `**`). Returns `None` on any
/// structural violation — that date is then silently dropped from the
/// comparable set.
fn parse_fuzzy_date(raw: &str) -> Option<FuzzyDate> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let (year, month, day) = (parts[0], parts[1], parts[2]);
    if !(4..=5).contains(&year.len()) || month.len() != 2 || day.len() != 2 {
        return None;
    }
    let year_digits = match year.chars().next() {
        Some('<') | Some('>') => &year[1..],
        _ => year,
    };
    if year_digits.is_empty() || !year_digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(FuzzyDate {
        year: year.to_string(),
        month: month.to_string(),
        day: day.to_string(),
    })
}

/// Widen a `FuzzyDate` to its maximal envelope: fuzzy components are
/// filled with `01` and the remaining duration of the containing
/// year/month is added to the upper bound.
fn materialize(fd: &FuzzyDate) -> Option<(NaiveDate, NaiveDate)> {
    let year: i32 = fd.year_digits().parse().ok()?;
    if fd.month_is_fuzzy() {
        let from = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let to = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
        return Some((from, to));
    }
    let month: u32 = fd.month.parse().ok()?;
    if fd.day_is_fuzzy() {
        let from = NaiveDate::from_ymd_opt(year, month, 1)?;
        let to = add_one_month(from)?;
        return Some((from, to));
    }
    let day: u32 = fd.day.parse().ok()?;
    let from = NaiveDate::from_ymd_opt(year, month, day)?;
    Some((from, from))
}

fn add_one_month(d: NaiveDate) -> Option<NaiveDate> {
    if d.month() == 12 {
        NaiveDate::from_ymd_opt(d.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(d.year(), d.month() + 1, 1)
    }
}

/// Parse every raw date string for one field on one side into a
/// `DateSet`. Threshold-marked dates (`<`/`>`) become `min`/`max` bounds;
/// everything else becomes an enumerable date.
pub fn parse_date_set(raw: &[String]) -> DateSet {
    let mut dates = Vec::new();
    let mut min = None;
    let mut max = None;

    for value in raw {
        let Some(fd) = parse_fuzzy_date(value) else {
            continue;
        };
        match fd.threshold() {
            Some(Threshold::Min) => {
                if let Some((from, _)) = materialize(&fd) {
                    min = Some(from);
                }
            }
            Some(Threshold::Max) => {
                if let Some((_, to)) = materialize(&fd) {
                    max = Some(to);
                }
            }
            None => dates.push(fd),
        }
    }

    DateSet { dates, min, max }
}

fn ocr_normalize_digits(value: &str) -> String {
    value.replace('7', "1")
}

fn month_day_sequences(fd: &FuzzyDate) -> [String; 5] {
    let ocr_month = ocr_normalize_digits(&fd.month);
    let ocr_day = ocr_normalize_digits(&fd.day);
    [
        format!("{}-{}", fd.month, fd.day),
        format!("{}-{}", fd.day, fd.month),
        format!("{ocr_month}-{ocr_day}"),
        format!("{}-**", fd.month),
        "**-**".to_string(),
    ]
}

/// `[yyyy, yyyy with its last two digits swapped]`. The swap always runs —
/// it exists specifically to catch transposed-digit years, which by
/// definition shift the numeric year, so it is never discarded based on
/// how far it shifts.
fn year_sequences(fd: &FuzzyDate) -> [String; 2] {
    let year = fd.year_digits();
    let swapped = swapped_last_two_digits(year).unwrap_or_else(|| year.to_string());
    [year.to_string(), swapped]
}

fn swapped_last_two_digits(year: &str) -> Option<String> {
    let chars: Vec<char> = year.chars().collect();
    if chars.len() < 4 {
        return None;
    }
    Some(format!("{}{}{}{}", chars[0], chars[1], chars[3], chars[2]))
}

/// Edit distance from `canonical` (the opposing side's un-varied `mm-dd`
/// or `yyyy`) to each of `variants` (this date's full sequence list),
/// scaled by `multipliers` and then offset by `weights` — in that order.
/// Returns the minimum across variants.
fn weighted_min_penalty(variants: &[String], canonical: &str, weights: &[f64], multipliers: &[f64]) -> f64 {
    variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let distance = damerau_levenshtein(canonical, variant) as f64;
            distance * multipliers[i] + weights[i]
        })
        .fold(f64::INFINITY, f64::min)
}

/// Variants are generated for `local` and measured against `external`'s
/// canonical (index-0) form only — the comparison is directional, not a
/// symmetric pairing of equivalent variant slots.
fn pair_score(local: &FuzzyDate, external: &FuzzyDate) -> f64 {
    let local_month_day = month_day_sequences(local);
    let external_month_day = month_day_sequences(external);
    let month_day_penalty = weighted_min_penalty(
        &local_month_day,
        &external_month_day[0],
        &MONTH_DAY_WEIGHTS,
        &MONTH_DAY_MULTIPLIERS,
    );
    let local_year = year_sequences(local);
    let external_year = year_sequences(external);
    let year_penalty = weighted_min_penalty(
        &local_year,
        &external_year[0],
        &YEAR_WEIGHTS,
        &YEAR_MULTIPLIERS,
    );
    let mut string_score = (month_day_penalty + year_penalty).min(3.0) / 3.0;

    let timedelta_score = match (materialize(local), materialize(external)) {
        (Some((local_from, _)), Some((external_from, _))) => {
            let delta_days = (local_from - external_from).num_days().unsigned_abs() as f64;
            if delta_days > 10.0 {
                string_score += delta_days / TIMEDELTA_TIE_BREAK_DIVISOR;
            }
            delta_days / 4.0
        }
        _ => f64::INFINITY,
    };

    string_score.min(timedelta_score).min(1.0)
}

fn ranges_overlap(local: &DateSet, external: &DateSet) -> bool {
    let lower = match (local.min, external.min) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    };
    let upper = match (local.max, external.max) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    };
    // Strict inequality: touching-but-not-overlapping ranges count as
    // overlapping.
    match (lower, upper) {
        (Some(lo), Some(hi)) => !(lo > hi),
        _ => true,
    }
}

fn enumerable_within_range(range: &DateSet, date: &FuzzyDate) -> bool {
    let Some((from, to)) = materialize(date) else {
        return false;
    };
    match (range.min, range.max) {
        (Some(min), Some(max)) => to >= min && from <= max,
        (Some(min), None) => to >= min,
        (None, Some(max)) => from <= max,
        (None, None) => true,
    }
}

/// Compare a field's raw date strings from both sides. Returns the score
/// in `[-1, 1]` and, when the field could not be compared at all, a
/// diagnostic `info` string.
pub fn compare(local_raw: &[String], external_raw: &[String]) -> (f64, Option<String>) {
    let local = parse_date_set(local_raw);
    let external = parse_date_set(external_raw);

    if local.is_empty() || external.is_empty() {
        return (0.0, Some(COULD_NOT_COMPARE.to_string()));
    }

    if local.is_pure_range() && external.is_pure_range() {
        return if ranges_overlap(&local, &external) {
            (1.0, None)
        } else {
            (-1.0, Some("date ranges do not overlap".to_string()))
        };
    }

    if local.is_pure_range() && !external.dates.is_empty() {
        return range_vs_enumerable(&local, &external.dates);
    }
    if external.is_pure_range() && !local.dates.is_empty() {
        return range_vs_enumerable(&external, &local.dates);
    }

    if local.dates.is_empty() || external.dates.is_empty() {
        return (0.0, Some(COULD_NOT_COMPARE.to_string()));
    }

    let min_pair_score = local
        .dates
        .iter()
        .flat_map(|l| external.dates.iter().map(move |e| pair_score(l, e)))
        .fold(f64::INFINITY, f64::min);

    ((PI * min_pair_score).cos(), None)
}

fn range_vs_enumerable(range: &DateSet, enumerable: &[FuzzyDate]) -> (f64, Option<String>) {
    if enumerable.iter().any(|d| enumerable_within_range(range, d)) {
        (1.0, None)
    } else {
        (-1.0, Some("date outside range".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_dates_score_one() {
        let (score, info) = compare(&["1910-05-12".to_string()], &["1910-05-12".to_string()]);
        assert!(info.is_none());
        assert!((score - 1.0).abs() < 1e-6, "score was {score}");
    }

    #[test]
    fn day_month_swap_scores_positive_but_not_one() {
        let (score, _) = compare(&["1910-05-12".to_string()], &["1910-12-05".to_string()]);
        assert!(score > 0.0 && score < 1.0, "score was {score}");
    }

    #[test]
    fn threshold_excludes_out_of_range_date() {
        let (score, _) = compare(&[">1940-01-01".to_string()], &["1935-06-01".to_string()]);
        assert_eq!(score, -1.0);
    }

    #[test]
    fn unparseable_dates_report_could_not_compare() {
        let (score, info) = compare(&["not-a-date".to_string()], &["1910-05-12".to_string()]);
        assert_eq!(score, 0.0);
        assert_eq!(info.as_deref(), Some(COULD_NOT_COMPARE));
    }

    #[test]
    fn transposed_year_still_scores_the_swap_variant() {
        // 1971 vs 1917: a large shift (54) in absolute terms, but an exact
        // match once the last two digits are swapped back.
        let transposed = compare(&["1971-05-12".to_string()], &["1917-05-12".to_string()]);
        let unrelated = compare(&["1971-05-12".to_string()], &["1940-05-12".to_string()]);
        assert!(
            transposed.0 > unrelated.0,
            "transposed year {} should score higher than an unrelated year {}",
            transposed.0,
            unrelated.0
        );
    }
}
