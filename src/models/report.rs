//! `FieldResult` and `MatchReport` — the output side of the data model.

use serde::{Deserialize, Serialize};

use super::bag::{DisregardBag, NameBag};

/// The operands a field comparison was actually performed on, kept
/// alongside the score for auditability. Name/place fields compare
/// `NameBag`s; date fields compare raw date strings (the parsed
/// `DateSet` form is an implementation detail of `matching::dates`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOperands {
    Names {
        local: NameBag,
        external: NameBag,
        #[serde(skip_serializing_if = "Option::is_none")]
        disregard: Option<DisregardBag>,
    },
    Dates {
        local: Vec<String>,
        external: Vec<String>,
    },
}

/// A field comparison that was actually carried out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputedField {
    /// Combined score in `[-1, 1]`.
    pub score: f64,
    /// `score * max_absolute_score`.
    pub absolute_score: f64,
    pub max_absolute_score: f64,
    /// Smaller-cardinality side's score (used directly for place fields).
    pub smaller_side_score: f64,
    pub larger_side_score: f64,
    pub operands: FieldOperands,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// The result of comparing one field across both records.
///
/// Modeled as a tagged variant rather than a dynamic, sometimes-a-number,
/// sometimes-a-struct value: a field is either `Computed` (both sides
/// present, or enough content on one side to compare against a threshold
/// range), `NotCompared` (present but nothing comparable survived — e.g.
/// every token fell to the acronym filter), or `Absent` (missing on both
/// sides, omitted from every denominator).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum FieldResult {
    Computed(ComputedField),
    NotCompared { info: String },
    Absent,
}

impl MatchReport {
    /// Serialize the report to its external JSON representation.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed variant of [`MatchReport::to_json`], convenient for
    /// logging or ad hoc inspection.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FieldResult {
    pub fn absolute_score(&self) -> f64 {
        match self {
            FieldResult::Computed(c) => c.absolute_score,
            _ => 0.0,
        }
    }

    pub fn max_absolute_score(&self) -> f64 {
        match self {
            FieldResult::Computed(c) => c.max_absolute_score,
            _ => 0.0,
        }
    }
}

/// The six-field comparison report and the derived verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub forenames: FieldResult,
    pub surnames: FieldResult,
    pub birth_place: FieldResult,
    pub birth_date: FieldResult,
    pub death_place: FieldResult,
    pub death_date: FieldResult,

    pub absolute_score: f64,
    pub relative_score: f64,
    pub total_relative_score: f64,
    pub max_score_reachable: f64,
    pub max_total_score_reachable: f64,
    pub automatically_matched: bool,
    pub matching_algorithm_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_json() {
        let report = MatchReport {
            forenames: FieldResult::Absent,
            surnames: FieldResult::Absent,
            birth_place: FieldResult::Absent,
            birth_date: FieldResult::NotCompared {
                info: "Could not compare".to_string(),
            },
            death_place: FieldResult::Absent,
            death_date: FieldResult::Absent,
            absolute_score: 0.0,
            relative_score: 0.0,
            total_relative_score: 0.0,
            max_score_reachable: 0.0,
            max_total_score_reachable: 0.0,
            automatically_matched: false,
            matching_algorithm_version: "2.7".to_string(),
        };
        let json = report.to_json().unwrap();
        let parsed: MatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.matching_algorithm_version, "2.7");
        assert!(!parsed.automatically_matched);
    }
}
