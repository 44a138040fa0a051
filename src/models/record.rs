//! The six-field input record and its parallel disregard-set shape.

use serde::{Deserialize, Serialize};

/// A biographical person record as supplied by one side of a comparison.
///
/// Each field, when present, is an ordered sequence of raw strings as
/// the caller's source database stored them. `forenames`/`surnames` are
/// free-form name lists; `birth_place`/`death_place` are place strings;
/// `birth_date`/`death_date` are `YYYY-MM-DD` strings, optionally with
/// `**` fuzzy components or a leading `<`/`>` threshold marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonRecord {
    pub forenames: Option<Vec<String>>,
    pub surnames: Option<Vec<String>>,
    pub birth_place: Option<Vec<String>>,
    pub birth_date: Option<Vec<String>>,
    pub death_place: Option<Vec<String>>,
    pub death_date: Option<Vec<String>>,
}

/// Tokens to disregard per field, same shape as `PersonRecord`'s name/place
/// fields. Matching one of these values does not suppress a side entirely
/// (see `matching::multivalue`) and never empties a bag completely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisregardSet {
    #[serde(default)]
    pub forenames: Vec<String>,
    #[serde(default)]
    pub surnames: Vec<String>,
    #[serde(default)]
    pub birth_place: Vec<String>,
    #[serde(default)]
    pub birth_date: Vec<String>,
    #[serde(default)]
    pub death_place: Vec<String>,
    #[serde(default)]
    pub death_date: Vec<String>,
}
