//! Response orchestration: the understanding-and-response pipeline

pub mod models;

pub use models::{ChatReply, EngineStats};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::knowledge::{FaqItem, InMemoryKnowledgeBase, KnowledgeStore};
use crate::learning::LearningModule;
use crate::metrics::Metrics;
use crate::nlp::{Entity, EntityKind, Intent, IntentResult, NlpEngine};
use crate::session::{ConversationManager, SharedContext};
use std::sync::Arc;
use tracing::{debug, error, info};

const FIRST_GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";
const REPEAT_GREETING: &str = "Hi again! What else can I help you with?";
const QUESTION_DEFAULT: &str = "That's an interesting question! Let me think about that...";
const TECHNICAL_PREFIX: &str = "I can help you with technical questions. ";
const FAREWELL_REPLY: &str =
    "Goodbye! It was nice talking with you. Feel free to reach out anytime!";
const INFORMATION_REPLY: &str =
    "I'll help you find that information. What specifically would you like to know?";
const COMPLAINT_REPLY: &str =
    "I understand your concern. Let me help you resolve this issue. Could you provide more details?";
const PRAISE_REPLY: &str =
    "Thank you for the kind words! I'm here to help whenever you need assistance.";
const NOT_SURE_REPLY: &str =
    "I'm not entirely sure about that. Could you rephrase your question or ask something else?";
const ERROR_REPLY: &str = "I'm sorry, I encountered an error. Please try again.";

/// Rule-based conversational response engine
///
/// One instance owns its NLP components, knowledge store, learning module,
/// and session contexts; nothing is process-global. The instance is
/// `Send + Sync`, so callers may drive it from one task per incoming
/// message.
pub struct ResponseEngine {
    config: EngineConfig,
    nlp: NlpEngine,
    knowledge: Arc<dyn KnowledgeStore>,
    learning: LearningModule,
    sessions: ConversationManager,
    metrics: Metrics,
}

impl ResponseEngine {
    /// Create an engine with the default in-memory knowledge base
    pub fn new(config: EngineConfig) -> Result<Self> {
        let threshold = config.similarity_threshold;
        Self::with_knowledge(config, Arc::new(InMemoryKnowledgeBase::new(threshold)))
    }

    /// Create an engine over an injected knowledge store
    pub fn with_knowledge(config: EngineConfig, knowledge: Arc<dyn KnowledgeStore>) -> Result<Self> {
        config.validate()?;
        let engine = Self {
            nlp: NlpEngine::new(config.confidence_divisor)?,
            learning: LearningModule::new(config.initial_accuracy, config.accuracy_smoothing),
            sessions: ConversationManager::new(),
            metrics: Metrics::new()?,
            knowledge,
            config,
        };
        info!("response engine initialized");
        Ok(engine)
    }

    /// Process one user message for a session
    ///
    /// Never fails to the caller: any internal pipeline error is logged and
    /// converted into the fixed error reply with intent `error`, confidence
    /// 0.0, and no entities.
    pub fn process_message(&self, text: &str, session_id: &str) -> ChatReply {
        match self.process_inner(text, session_id) {
            Ok(reply) => reply,
            Err(err) => {
                error!(%err, session_id, "error processing message");
                self.metrics.boundary_errors.inc();
                ChatReply::new(ERROR_REPLY.to_string(), Intent::Error, 0.0, Vec::new())
            }
        }
    }

    fn process_inner(&self, text: &str, session_id: &str) -> Result<ChatReply> {
        let normalized = self.nlp.normalize(text);
        let result = self.nlp.classify(&normalized);
        // Entities come from the original text so spans point at the source
        let entities = self.nlp.extract_entities(text);

        debug!(
            session_id,
            intent = %result.intent,
            confidence = result.confidence,
            entity_count = entities.len(),
            "pipeline classified message"
        );

        let context = self.sessions.context(session_id);
        let message = self.generate_response(&result, &entities, &context, &normalized);

        self.sessions.update_context(session_id, text, &message, &result);
        self.learning.record_interaction(text, &message, &result, &entities);
        self.metrics.record_message(result.intent.as_str(), result.confidence);

        Ok(ChatReply::new(message, result.intent, result.confidence, entities))
    }

    /// Branch on classifier confidence: handler table, then the learned
    /// examples, then the low-confidence fallback chain
    fn generate_response(
        &self,
        result: &IntentResult,
        entities: &[Entity],
        context: &SharedContext,
        input: &str,
    ) -> String {
        if result.confidence > self.config.high_confidence {
            return self.handle_high_confidence(result.intent, entities, context, input);
        }

        if result.confidence > self.config.medium_confidence {
            if let Some(reply) = self
                .learning
                .similar_example_response(input, result.intent.as_str())
            {
                self.metrics.record_fallback("learned");
                return reply;
            }
        }

        self.handle_low_confidence(input)
    }

    fn handle_high_confidence(
        &self,
        intent: Intent,
        entities: &[Entity],
        context: &SharedContext,
        input: &str,
    ) -> String {
        match intent {
            Intent::Greeting => self.handle_greeting(context),
            Intent::Question => self.handle_question(entities, input),
            Intent::TechnicalHelp => self.handle_technical_help(entities),
            Intent::Farewell => self.handle_farewell(context),
            Intent::InformationRequest => INFORMATION_REPLY.to_string(),
            Intent::Complaint => COMPLAINT_REPLY.to_string(),
            Intent::Praise => PRAISE_REPLY.to_string(),
            other => self
                .knowledge
                .response_for_intent(other.as_str())
                .unwrap_or_else(|| NOT_SURE_REPLY.to_string()),
        }
    }

    fn handle_greeting(&self, context: &SharedContext) -> String {
        let first = context
            .read()
            .map(|ctx| ctx.is_first_interaction())
            .unwrap_or(true);
        if first {
            FIRST_GREETING.to_string()
        } else {
            REPEAT_GREETING.to_string()
        }
    }

    /// Consult extracted entities against the knowledge base: topics first,
    /// then technologies, then the canned patterns before giving up on a
    /// scripted default
    fn handle_question(&self, entities: &[Entity], input: &str) -> String {
        for entity in entities {
            if entity.kind == EntityKind::Topic {
                if let Some(reply) = self.knowledge.topic_response(&entity.value) {
                    return reply;
                }
            }
        }
        for entity in entities {
            if entity.kind == EntityKind::Technology {
                if let Some(reply) = self.knowledge.technical_response(&entity.value) {
                    return reply;
                }
            }
        }
        if let Some(reply) = self.nlp.match_patterns(input) {
            self.metrics.record_fallback("pattern");
            return reply;
        }
        QUESTION_DEFAULT.to_string()
    }

    fn handle_technical_help(&self, entities: &[Entity]) -> String {
        let mut reply = String::from(TECHNICAL_PREFIX);
        for entity in entities {
            if entity.kind == EntityKind::Technology {
                if let Some(description) = self.knowledge.technical_response(&entity.value) {
                    reply.push_str(&description);
                }
            }
        }
        reply
    }

    fn handle_farewell(&self, context: &SharedContext) -> String {
        if let Ok(mut ctx) = context.write() {
            ctx.set_ended(true);
        }
        FAREWELL_REPLY.to_string()
    }

    /// Fallback chain: canned pattern, then knowledge-base similarity, then
    /// the fixed "not sure" default
    fn handle_low_confidence(&self, input: &str) -> String {
        if let Some(reply) = self.nlp.match_patterns(input) {
            self.metrics.record_fallback("pattern");
            return reply;
        }

        if let Some(reply) = self.knowledge.find_similar(input) {
            self.metrics.record_fallback("similarity");
            return reply;
        }

        self.metrics.record_fallback("default");
        NOT_SURE_REPLY.to_string()
    }

    /// Bulk-load FAQ items into the knowledge base and the learning module
    pub fn train_with_faqs(&self, items: Vec<FaqItem>) {
        let count = items.len();
        self.learning.absorb_faqs(&items);
        self.knowledge.train_with_faqs(items);
        self.metrics.faq_items_ingested.inc_by(count as f64);
        info!(count, "training completed");
    }

    /// Insert one question/answer pair and learn from it incrementally
    pub fn add_knowledge(&self, question: &str, answer: &str, category: &str) {
        self.knowledge.add_knowledge(question, answer, category);
        self.learning.learn_incrementally(question, answer, category);
        self.metrics.knowledge_inserts.inc();
    }

    /// Compute the current statistics snapshot
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_conversations: self.sessions.total_conversations(),
            model_accuracy: self.learning.model_accuracy(),
            knowledge_count: self.knowledge.knowledge_count(),
            average_conversation_length: self.sessions.average_conversation_length(),
        }
    }

    /// Export engine metrics in Prometheus text format
    pub fn metrics_text(&self) -> String {
        self.metrics.export_prometheus()
    }

    /// Session-context owner, exposed for introspection
    pub fn sessions(&self) -> &ConversationManager {
        &self.sessions
    }

    /// Learning module, exposed for introspection
    pub fn learning(&self) -> &LearningModule {
        &self.learning
    }
}
