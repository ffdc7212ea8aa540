//! Engine configuration

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Tunable thresholds for the response pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Above this confidence the per-intent handler table is used
    pub high_confidence: f64,
    /// Above this confidence (up to `high_confidence`) the learned-example
    /// responder is attempted before the low-confidence fallback chain
    pub medium_confidence: f64,
    /// Minimum Jaccard similarity for a knowledge-base fallback hit
    pub similarity_threshold: f64,
    /// Divisor mapping an accumulated intent score to a [0,1] confidence
    pub confidence_divisor: f64,
    /// Starting value for the smoothed accuracy estimate
    pub initial_accuracy: f64,
    /// Exponential smoothing factor applied to the accuracy estimate
    pub accuracy_smoothing: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            high_confidence: 0.8,
            medium_confidence: 0.5,
            similarity_threshold: 0.3,
            confidence_divisor: 3.0,
            initial_accuracy: 0.75,
            accuracy_smoothing: 0.9,
        }
    }
}

impl EngineConfig {
    /// Validate that the configuration is consistent
    pub fn validate(&self) -> Result<()> {
        if self.medium_confidence >= self.high_confidence {
            return Err(EngineError::Configuration(format!(
                "medium_confidence {} must be below high_confidence {}",
                self.medium_confidence, self.high_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(EngineError::Configuration(format!(
                "similarity_threshold {} outside [0, 1]",
                self.similarity_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.accuracy_smoothing) {
            return Err(EngineError::Configuration(format!(
                "accuracy_smoothing {} outside [0, 1]",
                self.accuracy_smoothing
            )));
        }
        if self.confidence_divisor <= 0.0 {
            return Err(EngineError::Configuration(
                "confidence_divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = EngineConfig {
            high_confidence: 0.4,
            medium_confidence: 0.5,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_smoothing_rejected() {
        let config = EngineConfig {
            accuracy_smoothing: 1.5,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
