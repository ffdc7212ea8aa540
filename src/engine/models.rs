//! Boundary models for the response engine

use crate::nlp::{Entity, Intent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reply returned for one processed message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub intent: Intent,
    pub confidence: f64,
    pub entities: Vec<Entity>,
    pub timestamp: DateTime<Utc>,
}

impl ChatReply {
    pub fn new(message: String, intent: Intent, confidence: f64, entities: Vec<Entity>) -> Self {
        Self {
            message,
            intent,
            confidence,
            entities,
            timestamp: Utc::now(),
        }
    }
}

/// Read-only statistics snapshot, computed on demand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_conversations: u64,
    pub model_accuracy: f64,
    pub knowledge_count: usize,
    pub average_conversation_length: f64,
}
