//! Per-session conversation context management

use crate::nlp::IntentResult;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Mutable state for one conversation session
#[derive(Debug)]
pub struct ConversationContext {
    session_id: String,
    history: Vec<String>,
    last_intent: Option<String>,
    last_user_input: Option<String>,
    last_bot_response: Option<String>,
    started_at: DateTime<Utc>,
    last_interaction: DateTime<Utc>,
    ended: bool,
    interaction_count: u32,
}

impl ConversationContext {
    fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            history: Vec::new(),
            last_intent: None,
            last_user_input: None,
            last_bot_response: None,
            started_at: now,
            last_interaction: now,
            ended: false,
            interaction_count: 0,
        }
    }

    /// Append one exchange: two history lines, the last-* slots, and the
    /// interaction count
    fn add_interaction(&mut self, user_input: &str, bot_response: &str, result: &IntentResult) {
        self.history.push(format!("User: {}", user_input));
        self.history.push(format!("Bot: {}", bot_response));
        self.last_interaction = Utc::now();
        self.interaction_count += 1;

        self.last_intent = Some(result.intent.as_str().to_string());
        self.last_user_input = Some(user_input.to_string());
        self.last_bot_response = Some(bot_response.to_string());
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// True until the second completed exchange
    pub fn is_first_interaction(&self) -> bool {
        self.interaction_count <= 1
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last_intent(&self) -> Option<&str> {
        self.last_intent.as_deref()
    }

    pub fn last_user_input(&self) -> Option<&str> {
        self.last_user_input.as_deref()
    }

    pub fn last_bot_response(&self) -> Option<&str> {
        self.last_bot_response.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn last_interaction(&self) -> DateTime<Utc> {
        self.last_interaction
    }

    pub fn conversation_duration(&self) -> Duration {
        self.last_interaction - self.started_at
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn set_ended(&mut self, ended: bool) {
        self.ended = ended;
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }
}

/// Shared handle to one session's context
pub type SharedContext = Arc<RwLock<ConversationContext>>;

/// Owner of all session contexts, keyed by session id
///
/// Contexts are created lazily and exactly once per session id; repeated
/// lookups return the same handle. Per-session mutation is serialized by
/// the context's own lock, so unrelated sessions never contend. Session
/// expiry is an external concern; nothing is evicted here.
pub struct ConversationManager {
    contexts: DashMap<String, SharedContext>,
    total_conversations: AtomicU64,
}

impl ConversationManager {
    pub fn new() -> Self {
        Self {
            contexts: DashMap::new(),
            total_conversations: AtomicU64::new(0),
        }
    }

    /// Get or lazily create the context for a session id
    pub fn context(&self, session_id: &str) -> SharedContext {
        self.contexts
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id, "creating conversation context");
                Arc::new(RwLock::new(ConversationContext::new(session_id.to_string())))
            })
            .clone()
    }

    /// Record one completed exchange for a session
    ///
    /// The total-conversation counter is bumped exactly when the session's
    /// interaction count transitions to 1.
    pub fn update_context(
        &self,
        session_id: &str,
        user_input: &str,
        bot_response: &str,
        result: &IntentResult,
    ) {
        let context = self.context(session_id);
        let mut guard = match context.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.add_interaction(user_input, bot_response, result);
        if guard.interaction_count() == 1 {
            self.total_conversations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn total_conversations(&self) -> u64 {
        self.total_conversations.load(Ordering::Relaxed)
    }

    pub fn session_count(&self) -> usize {
        self.contexts.len()
    }

    /// Mean history length (lines) across sessions, 0.0 with no sessions
    pub fn average_conversation_length(&self) -> f64 {
        if self.contexts.is_empty() {
            return 0.0;
        }

        let total_lines: usize = self
            .contexts
            .iter()
            .map(|entry| entry.value().read().map(|ctx| ctx.history().len()).unwrap_or(0))
            .sum();
        total_lines as f64 / self.contexts.len() as f64
    }
}

impl Default for ConversationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Intent;

    fn result() -> IntentResult {
        IntentResult {
            intent: Intent::Greeting,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_same_id_returns_same_context() {
        let manager = ConversationManager::new();
        let a = manager.context("s1");
        let b = manager.context("s1");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_ids_get_distinct_contexts() {
        let manager = ConversationManager::new();
        let a = manager.context("s1");
        let b = manager.context("s2");
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_first_interaction_flag_and_total() {
        let manager = ConversationManager::new();

        manager.update_context("s1", "hello", "hi!", &result());
        {
            let ctx = manager.context("s1");
            let guard = ctx.read().unwrap();
            assert!(guard.is_first_interaction());
        }
        assert_eq!(manager.total_conversations(), 1);

        manager.update_context("s1", "hello again", "hi again!", &result());
        {
            let ctx = manager.context("s1");
            let guard = ctx.read().unwrap();
            assert!(!guard.is_first_interaction());
            assert_eq!(guard.interaction_count(), 2);
        }
        // Second exchange in the same session does not re-count
        assert_eq!(manager.total_conversations(), 1);
    }

    #[test]
    fn test_history_and_last_slots() {
        let manager = ConversationManager::new();
        manager.update_context("s1", "hello", "hi!", &result());

        let ctx = manager.context("s1");
        let guard = ctx.read().unwrap();
        assert_eq!(guard.history(), ["User: hello", "Bot: hi!"]);
        assert_eq!(guard.last_intent(), Some("greeting"));
        assert_eq!(guard.last_user_input(), Some("hello"));
        assert_eq!(guard.last_bot_response(), Some("hi!"));
    }

    #[test]
    fn test_average_conversation_length() {
        let manager = ConversationManager::new();
        assert_eq!(manager.average_conversation_length(), 0.0);

        manager.update_context("s1", "a", "b", &result());
        manager.update_context("s1", "c", "d", &result());
        manager.update_context("s2", "e", "f", &result());
        // (4 + 2) / 2 sessions
        assert_eq!(manager.average_conversation_length(), 3.0);
    }

    #[test]
    fn test_ended_flag() {
        let manager = ConversationManager::new();
        let ctx = manager.context("s1");
        ctx.write().unwrap().set_ended(true);
        assert!(manager.context("s1").read().unwrap().is_ended());
    }
}
