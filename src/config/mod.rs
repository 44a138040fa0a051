//! Configuration for the matching engine

use serde::{Deserialize, Serialize};

use crate::models::DisregardSet;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Matching configuration
    pub matching: MatchingConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

/// Tunables for the scoring engine itself.
///
/// `absolute_score_gate` and `perfect_relative_score_gate` are the two
/// verdict thresholds from the aggregator (algorithm version "2.7"); they
/// are exposed here so a deployment can tune the gate without recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub algorithm_version: String,
    pub absolute_score_gate: f64,
    pub perfect_relative_score_gate: f64,
    /// If set, applied whenever a caller does not supply its own disregard set.
    pub default_disregard_values: Option<DisregardSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            observability: ObservabilityConfig {
                service_name: "record-match-scorer".to_string(),
                log_level: "info".to_string(),
            },
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            algorithm_version: crate::matching::aggregator::ALGORITHM_VERSION.to_string(),
            absolute_score_gate: 60.0,
            perfect_relative_score_gate: 50.0,
            default_disregard_values: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(gate) = std::env::var("MATCHING_ABSOLUTE_SCORE_GATE") {
            config.matching.absolute_score_gate = gate
                .parse()
                .map_err(|_| crate::Error::config("MATCHING_ABSOLUTE_SCORE_GATE must be a number"))?;
        }
        if let Ok(gate) = std::env::var("MATCHING_PERFECT_RELATIVE_SCORE_GATE") {
            config.matching.perfect_relative_score_gate = gate
                .parse()
                .map_err(|_| crate::Error::config("MATCHING_PERFECT_RELATIVE_SCORE_GATE must be a number"))?;
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.observability.log_level = level;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_algorithm_2_7_gates() {
        let config = MatchingConfig::default();
        assert_eq!(config.absolute_score_gate, 60.0);
        assert_eq!(config.perfect_relative_score_gate, 50.0);
        assert_eq!(config.algorithm_version, "2.7");
    }
}
