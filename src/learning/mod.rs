//! Interaction learning: training log, per-key example utterances, and a
//! smoothed accuracy estimate

use crate::nlp::similarity::jaccard;
use crate::nlp::{Entity, Intent, IntentResult};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::{debug, info};

/// Immutable record of one completed exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub user_input: String,
    pub bot_response: String,
    pub intent: Intent,
    pub entities: Vec<Entity>,
    pub timestamp: DateTime<Utc>,
}

/// Learning module
///
/// Example utterances are keyed by a single unified namespace: intent tags
/// and FAQ categories share it, so a category behaves as a synthetic intent
/// for example retrieval. The accuracy estimate is exponentially smoothed
/// from per-request classifier confidence.
pub struct LearningModule {
    training_log: RwLock<Vec<InteractionRecord>>,
    examples: DashMap<String, Vec<String>>,
    accuracy: RwLock<f64>,
    smoothing: f64,
}

impl LearningModule {
    pub fn new(initial_accuracy: f64, smoothing: f64) -> Self {
        Self {
            training_log: RwLock::new(Vec::new()),
            examples: DashMap::new(),
            accuracy: RwLock::new(initial_accuracy),
            smoothing,
        }
    }

    /// Record one exchange: append to the training log, file the input as an
    /// example for its intent, and fold the confidence into the accuracy
    /// estimate
    pub fn record_interaction(
        &self,
        input: &str,
        response: &str,
        result: &IntentResult,
        entities: &[Entity],
    ) {
        let record = InteractionRecord {
            user_input: input.to_string(),
            bot_response: response.to_string(),
            intent: result.intent,
            entities: entities.to_vec(),
            timestamp: Utc::now(),
        };

        if let Ok(mut log) = self.training_log.write() {
            log.push(record);
        }

        self.examples
            .entry(result.intent.as_str().to_string())
            .or_default()
            .push(input.to_string());

        if let Ok(mut accuracy) = self.accuracy.write() {
            *accuracy = *accuracy * self.smoothing + result.confidence * (1.0 - self.smoothing);
        }
    }

    /// Derive a reply from the most similar recorded example for a key
    ///
    /// Ties keep the first-seen example; with no similarity anywhere the
    /// first example still wins. `None` only when the key has no examples.
    pub fn similar_example_response(&self, input: &str, key: &str) -> Option<String> {
        let examples = self.examples.get(key)?;
        if examples.is_empty() {
            return None;
        }

        let mut best = &examples[0];
        let mut best_similarity = 0.0;
        for example in examples.iter() {
            let similarity = jaccard(input, example);
            if similarity > best_similarity {
                best_similarity = similarity;
                best = example;
            }
        }

        debug!(key, similarity = best_similarity, "learned-example response");
        Some(format!(
            "Based on similar questions I've seen, such as \"{}\", here's what I can help you with...",
            best
        ))
    }

    /// Fold a batch of FAQ questions into the example lists, keyed by
    /// category
    pub fn absorb_faqs(&self, items: &[crate::knowledge::FaqItem]) {
        for item in items {
            self.examples
                .entry(item.category().to_lowercase())
                .or_default()
                .push(item.question().to_string());
        }
        info!(count = items.len(), "model updated with FAQ examples");
    }

    /// Add a single question as an example under its category
    pub fn learn_incrementally(&self, question: &str, _answer: &str, category: &str) {
        self.examples
            .entry(category.to_lowercase())
            .or_default()
            .push(question.to_string());
        debug!(category, "incremental example added");
    }

    /// Current smoothed accuracy estimate
    pub fn model_accuracy(&self) -> f64 {
        self.accuracy.read().map(|a| *a).unwrap_or(0.0)
    }

    /// Number of recorded exchanges
    pub fn training_log_len(&self) -> usize {
        self.training_log.read().map(|log| log.len()).unwrap_or(0)
    }

    /// Number of examples filed under a key
    pub fn example_count(&self, key: &str) -> usize {
        self.examples.get(key).map(|e| e.len()).unwrap_or(0)
    }
}

impl Default for LearningModule {
    fn default() -> Self {
        Self::new(0.75, 0.9)
    }
}
