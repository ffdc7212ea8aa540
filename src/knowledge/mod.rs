//! Question/answer knowledge store with a similarity fallback search

pub mod models;

pub use models::FaqItem;

use crate::nlp::similarity::jaccard;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};

/// Narrow seam the orchestrator consults for stored answers
///
/// Injected at engine construction so independent engine instances never
/// share state and tests can substitute their own store.
pub trait KnowledgeStore: Send + Sync {
    /// Generic response for an intent key, if one is configured
    fn response_for_intent(&self, intent: &str) -> Option<String>;

    /// Case-insensitive exact-key lookup for a conversation topic
    fn topic_response(&self, topic: &str) -> Option<String>;

    /// Case-insensitive exact-key lookup for a technology
    fn technical_response(&self, technology: &str) -> Option<String>;

    /// Best-similarity fallback search across all descriptive entries
    fn find_similar(&self, input: &str) -> Option<String>;

    /// Insert one question/answer pair under a category
    fn add_knowledge(&self, question: &str, answer: &str, category: &str);

    /// Bulk-ingest FAQ items
    fn train_with_faqs(&self, items: Vec<FaqItem>);

    /// Number of stored entries across the generic and technical maps
    fn knowledge_count(&self) -> usize;
}

/// In-memory knowledge base
///
/// Three independent mappings (intent responses, category response lists,
/// technology/topic descriptions) plus the ingested FAQ list. All keys are
/// lowercased before insert and lookup.
pub struct InMemoryKnowledgeBase {
    responses: DashMap<String, String>,
    category_responses: DashMap<String, Vec<String>>,
    technical_responses: DashMap<String, String>,
    faq_items: RwLock<Vec<FaqItem>>,
    category_counts: DashMap<String, usize>,
    similarity_threshold: f64,
}

impl InMemoryKnowledgeBase {
    pub fn new(similarity_threshold: f64) -> Self {
        let store = Self {
            responses: DashMap::new(),
            category_responses: DashMap::new(),
            technical_responses: DashMap::new(),
            faq_items: RwLock::new(Vec::new()),
            category_counts: DashMap::new(),
            similarity_threshold,
        };
        store.seed();
        store
    }

    fn seed(&self) {
        let technical = [
            ("java", "Java is a versatile, object-oriented programming language. It's platform-independent and widely used for enterprise applications, Android development, and web services."),
            ("python", "Python is a high-level programming language known for its simplicity and readability. It's popular for data science, AI, web development, and automation."),
            ("javascript", "JavaScript is a dynamic programming language primarily used for web development. It can run in browsers and servers (Node.js)."),
            ("html", "HTML (HyperText Markup Language) is the standard markup language for creating web pages and web applications."),
            ("css", "CSS (Cascading Style Sheets) is used for describing the presentation of HTML documents, including layout, colors, and fonts."),
            ("sql", "SQL (Structured Query Language) is used for managing and querying relational databases."),
            ("ai", "Artificial Intelligence refers to computer systems that can perform tasks that typically require human intelligence, such as learning, reasoning, and problem-solving."),
            ("machine learning", "Machine Learning is a subset of AI that enables computers to learn and improve from experience without being explicitly programmed."),
            ("nlp", "Natural Language Processing is a branch of AI that helps computers understand, interpret, and generate human language."),
        ];
        for (key, value) in technical {
            self.technical_responses.insert(key.to_string(), value.to_string());
        }

        let generic = [
            ("greeting", "Hello! I'm here to help you with any questions you might have."),
            ("farewell", "Goodbye! Feel free to ask me anything anytime."),
            ("unknown", "I'm not sure about that. Could you please rephrase your question?"),
            ("praise", "Thank you! I'm glad I could help you."),
            ("complaint", "I apologize for any inconvenience. How can I help resolve this issue?"),
        ];
        for (key, value) in generic {
            self.responses.insert(key.to_string(), value.to_string());
        }
    }

    /// Ingested FAQ count
    pub fn training_faq_count(&self) -> usize {
        self.faq_items.read().map(|items| items.len()).unwrap_or(0)
    }

    /// Per-category FAQ ingest tallies
    pub fn category_statistics(&self) -> HashMap<String, usize> {
        self.category_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

impl Default for InMemoryKnowledgeBase {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl KnowledgeStore for InMemoryKnowledgeBase {
    fn response_for_intent(&self, intent: &str) -> Option<String> {
        self.responses
            .get(&intent.to_lowercase())
            .map(|r| r.value().clone())
    }

    fn topic_response(&self, topic: &str) -> Option<String> {
        self.technical_responses
            .get(&topic.to_lowercase())
            .map(|r| r.value().clone())
    }

    fn technical_response(&self, technology: &str) -> Option<String> {
        self.technical_responses
            .get(&technology.to_lowercase())
            .map(|r| r.value().clone())
    }

    fn find_similar(&self, input: &str) -> Option<String> {
        let mut best_similarity = 0.0;
        let mut best_response = None;

        for entry in self.technical_responses.iter() {
            let similarity = jaccard(input, entry.key());
            // Strictly-greater on both comparisons: the threshold is
            // exclusive and the first key seen keeps ties
            if similarity > best_similarity && similarity > self.similarity_threshold {
                best_similarity = similarity;
                best_response = Some(entry.value().clone());
            }
        }

        if best_response.is_some() {
            debug!(similarity = best_similarity, "similarity fallback hit");
        }
        best_response
    }

    fn add_knowledge(&self, question: &str, answer: &str, category: &str) {
        self.responses
            .insert(question.to_lowercase(), answer.to_string());
        self.category_responses
            .entry(category.to_lowercase())
            .or_default()
            .push(answer.to_string());
        info!(question, category, "added knowledge entry");
    }

    fn train_with_faqs(&self, items: Vec<FaqItem>) {
        let count = items.len();
        let mut stored = match self.faq_items.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for mut item in items {
            item.trim();
            *self.category_counts.entry(item.category().to_lowercase()).or_insert(0) += 1;
            stored.push(item);
        }
        info!(count, categories = self.category_counts.len(), "FAQ training ingested");
    }

    fn knowledge_count(&self) -> usize {
        self.responses.len() + self.technical_responses.len()
    }
}
