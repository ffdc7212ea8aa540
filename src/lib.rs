//! Rule-based conversational response engine
//!
//! Given free-text user input and a session identifier, the engine
//! normalizes the text, classifies intent against weighted trigger phrases,
//! extracts typed entities, consults per-session conversation context, and
//! returns a reply with confidence metadata. Low-confidence inputs fall
//! back through canned patterns, knowledge-base similarity search, and a
//! fixed default, in that order.
//!
//! Everything is in-memory and synchronous; persistence and any outer
//! transport are the caller's concern. One [`engine::ResponseEngine`]
//! instance is `Send + Sync` and safe to drive from one task per message.

pub mod config;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod learning;
pub mod metrics;
pub mod nlp;
pub mod session;

pub use config::EngineConfig;
pub use engine::{ChatReply, EngineStats, ResponseEngine};
pub use error::{EngineError, Result};
pub use knowledge::{FaqItem, InMemoryKnowledgeBase, KnowledgeStore};
pub use learning::LearningModule;
pub use nlp::{Entity, EntityKind, Intent, IntentResult};
pub use session::ConversationManager;
