//! Data model for the record matching engine.
//!
//! The six fields a record may carry are a fixed, explicitly enumerated
//! set rather than a dynamic dictionary: `PersonRecord` has one optional
//! member per field, and every pipeline stage iterates that fixed set.

pub mod bag;
pub mod date;
pub mod record;
pub mod report;

pub use bag::{DisregardBag, NameBag, Token};
pub use date::{DateSet, FuzzyDate};
pub use record::{DisregardSet, PersonRecord};
pub use report::{FieldResult, MatchReport};

/// Baseline disregard values for archival identity records, where these
/// tokens are common boilerplate rather than discriminating content. Not
/// applied automatically — a caller opts in by passing
/// `DEFAULT_DISREGARD_VALUES.clone()` (or `Config::matching::default_disregard_values`)
/// as the disregard set.
pub fn default_disregard_values() -> DisregardSet {
    DisregardSet {
        forenames: vec!["Israel".to_string(), "Sarah".to_string(), "Sara".to_string()],
        surnames: Vec::new(),
        birth_place: vec!["Deutsches".to_string(), "Reich".to_string()],
        birth_date: Vec::new(),
        death_place: Vec::new(),
        death_date: Vec::new(),
    }
}
