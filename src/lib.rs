//! Biographical record matching and scoring engine
//!
//! Computes a similarity score between two candidate person records drawn
//! from independent biographical databases and decides whether they may be
//! linked automatically. The engine is a pure function: no database access,
//! no candidate retrieval, no I/O.
//!
//! - Unicode transliteration and name normalization
//! - Double-Metaphone phonetic coding
//! - Multi-value (multiset) token alignment
//! - Fuzzy, open-ended date comparison
//! - Weighted aggregation into a final match verdict

// Module declarations
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod observability;

// Re-exports
pub use error::{Error, Result};
pub use matching::score_records;
pub use models::{DisregardSet, MatchReport, PersonRecord};
