//! Intent classification over weighted trigger phrases

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coarse category of user purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Question,
    TechnicalHelp,
    Farewell,
    InformationRequest,
    Complaint,
    Praise,
    /// No trigger phrase matched
    Unknown,
    /// Pipeline failure converted at the orchestrator boundary
    Error,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Question => "question",
            Intent::TechnicalHelp => "technical_help",
            Intent::Farewell => "farewell",
            Intent::InformationRequest => "information_request",
            Intent::Complaint => "complaint",
            Intent::Praise => "praise",
            Intent::Unknown => "unknown",
            Intent::Error => "error",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification outcome for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    pub confidence: f64,
}

impl IntentResult {
    pub fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            confidence: 0.0,
        }
    }
}

/// Trigger phrases and score weight for one intent
struct IntentSpec {
    phrases: &'static [&'static str],
    weight: f64,
}

/// Rule-based intent classifier
///
/// Each intent carries a fixed trigger-phrase list and a positive weight;
/// technical_help and complaint are weighted highest so they win when a
/// message is ambiguous. Ties between equal scores go to the earlier
/// declared intent, so classification is deterministic.
pub struct IntentClassifier {
    specs: IndexMap<Intent, IntentSpec>,
    /// Divisor mapping an accumulated score to a [0,1] confidence
    confidence_divisor: f64,
    /// Bonus for a trigger phrase equal to the whole input
    exact_bonus: f64,
    /// Bonus for the input starting with a trigger phrase
    prefix_bonus: f64,
}

impl IntentClassifier {
    pub fn new(confidence_divisor: f64) -> Self {
        let mut specs = IndexMap::new();

        specs.insert(
            Intent::Greeting,
            IntentSpec {
                phrases: &[
                    "hello", "hello there", "hi", "hey", "good morning",
                    "good afternoon", "good evening", "greetings",
                ],
                weight: 1.0,
            },
        );
        specs.insert(
            Intent::Question,
            IntentSpec {
                phrases: &[
                    "what", "what is", "how", "why", "when", "where", "which",
                    "can you", "do you know",
                ],
                weight: 1.2,
            },
        );
        specs.insert(
            Intent::TechnicalHelp,
            IntentSpec {
                phrases: &[
                    "help", "problem", "issue", "error", "bug", "not working",
                    "technical", "support",
                ],
                weight: 1.5,
            },
        );
        specs.insert(
            Intent::Farewell,
            IntentSpec {
                phrases: &[
                    "bye", "goodbye", "see you", "farewell", "take care",
                    "until next time",
                ],
                weight: 1.0,
            },
        );
        specs.insert(
            Intent::InformationRequest,
            IntentSpec {
                phrases: &[
                    "tell me about", "information about", "details about",
                    "explain", "describe",
                ],
                weight: 1.3,
            },
        );
        specs.insert(
            Intent::Complaint,
            IntentSpec {
                phrases: &[
                    "complain", "complaint", "problem with", "issue with",
                    "not satisfied", "disappointed",
                ],
                weight: 1.4,
            },
        );
        specs.insert(
            Intent::Praise,
            IntentSpec {
                phrases: &[
                    "thank you", "thanks", "great job", "excellent", "amazing",
                    "wonderful", "helpful",
                ],
                weight: 1.1,
            },
        );

        Self {
            specs,
            confidence_divisor,
            exact_bonus: 0.5,
            prefix_bonus: 0.3,
        }
    }

    /// Classify input text into the best-scoring intent
    ///
    /// Every contained trigger phrase adds the intent's weight, with a bonus
    /// for an exact whole-input match and for a match at the start of the
    /// input. Confidence is the accumulated score divided by the configured
    /// divisor, capped at 1.0. No score at all yields `unknown` / 0.0.
    pub fn classify(&self, text: &str) -> IntentResult {
        let lower = text.to_lowercase();

        let mut best: Option<(Intent, f64)> = None;

        for (intent, spec) in &self.specs {
            let mut score = 0.0;

            for phrase in spec.phrases {
                if lower.contains(phrase) {
                    score += spec.weight;
                    if lower == *phrase {
                        score += self.exact_bonus;
                    }
                    if lower.starts_with(phrase) {
                        score += self.prefix_bonus;
                    }
                }
            }

            // Strictly-greater keeps the earliest declared intent on ties
            if score > 0.0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((*intent, score));
            }
        }

        match best {
            Some((intent, score)) => {
                let confidence = (score / self.confidence_divisor).min(1.0);
                debug!(intent = %intent, score, confidence, "classified input");
                IntentResult { intent, confidence }
            }
            None => IntentResult::unknown(),
        }
    }
}
