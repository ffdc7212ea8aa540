//! Natural-language understanding components
//!
//! Normalization, intent classification, entity extraction, and canned
//! pattern matching, composed behind a single facade.

pub mod entities;
pub mod intent;
pub mod normalizer;
pub mod patterns;
pub mod similarity;

pub use entities::{Entity, EntityExtractor, EntityKind};
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use normalizer::TextNormalizer;
pub use patterns::PatternMatcher;

use crate::error::Result;

/// Facade over the NLP components used by the response pipeline
pub struct NlpEngine {
    normalizer: TextNormalizer,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    patterns: PatternMatcher,
}

impl NlpEngine {
    pub fn new(confidence_divisor: f64) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new(),
            classifier: IntentClassifier::new(confidence_divisor),
            extractor: EntityExtractor::new()?,
            patterns: PatternMatcher::new()?,
        })
    }

    /// Normalize raw user input
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Classify normalized input into an intent with confidence
    pub fn classify(&self, text: &str) -> IntentResult {
        self.classifier.classify(text)
    }

    /// Extract typed entities from the original input
    pub fn extract_entities(&self, text: &str) -> Vec<Entity> {
        self.extractor.extract(text)
    }

    /// Look up a canned reply for a common query
    pub fn match_patterns(&self, text: &str) -> Option<String> {
        self.patterns.matches(text)
    }
}
