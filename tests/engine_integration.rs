//! Integration tests for the response engine
//!
//! These drive the full pipeline end to end (normalize, classify, extract,
//! branch, context update, learn) and verify the concurrency contracts with
//! one tokio task per message.

use response_engine::{
    EngineConfig, EntityKind, FaqItem, Intent, ResponseEngine,
};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn engine() -> ResponseEngine {
    init_tracing();
    ResponseEngine::new(EngineConfig::default()).unwrap()
}

#[test]
fn test_full_conversation_flow() {
    let engine = engine();
    let session = "integration-session";

    // Brand-new session greeting
    let reply = engine.process_message("Hello there!", session);
    assert_eq!(reply.intent, Intent::Greeting);
    assert!(reply.confidence > 0.8);
    assert_eq!(reply.message, "Hello! I'm your AI assistant. How can I help you today?");

    // Knowledge-backed technology question
    let reply = engine.process_message("What is Java?", session);
    assert_eq!(reply.intent, Intent::Question);
    assert!(reply.message.starts_with("Java is a versatile"));
    assert!(reply
        .entities
        .iter()
        .any(|e| e.kind == EntityKind::Technology && e.value == "Java"));

    // Canned pattern on the low-confidence path
    let reply = engine.process_message("What time is it?", session);
    assert!(reply.message.starts_with("The current time is "));

    // Praise acknowledgment
    let reply = engine.process_message("Thank you, that was amazing and wonderful", session);
    assert_eq!(reply.intent, Intent::Praise);
    assert!(reply.confidence > 0.8);
    assert_eq!(
        reply.message,
        "Thank you for the kind words! I'm here to help whenever you need assistance."
    );

    // Farewell ends the session
    let reply = engine.process_message("Goodbye, bye, take care!", session);
    assert_eq!(reply.intent, Intent::Farewell);
    let ctx = engine.sessions().context(session);
    assert!(ctx.read().unwrap().is_ended());

    let stats = engine.stats();
    assert_eq!(stats.total_conversations, 1);
    assert_eq!(stats.average_conversation_length, 10.0);
}

#[test]
fn test_gibberish_hits_every_fallback_and_defaults() {
    let engine = engine();
    let reply = engine.process_message("asdkjasd", "s1");
    assert_eq!(reply.intent, Intent::Unknown);
    assert_eq!(reply.confidence, 0.0);
    assert!(reply.entities.is_empty());
    assert_eq!(
        reply.message,
        "I'm not entirely sure about that. Could you rephrase your question or ask something else?"
    );
}

#[test]
fn test_faq_training_from_json() {
    let engine = engine();

    let json = r#"[
        {
            "question": "What is machine learning?",
            "answer": "Machine learning is a subset of AI",
            "category": "ai",
            "keywords": ["what", "machine", "learning?"],
            "relevance_score": 1.0,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        },
        {
            "question": "How does NLP work?",
            "answer": "NLP processes human language using algorithms",
            "category": "ai",
            "keywords": ["does", "work?"],
            "relevance_score": 1.0,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }
    ]"#;
    let items: Vec<FaqItem> = serde_json::from_str(json).unwrap();
    engine.train_with_faqs(items);

    assert_eq!(engine.learning().example_count("ai"), 2);
}

#[test]
fn test_knowledge_insert_then_lookup() {
    let engine = engine();
    engine.add_knowledge("What is Rust?", "Rust is a systems programming language", "programming");

    let stats = engine.stats();
    assert_eq!(stats.knowledge_count, 15);
    assert_eq!(engine.learning().example_count("programming"), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_session_creates_one_context() {
    let engine = Arc::new(engine());
    let mut handles = Vec::new();

    for i in 0..16 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let reply = engine.process_message(&format!("Hello there! ({})", i), "shared");
            assert_eq!(reply.intent, Intent::Greeting);
            engine.sessions().context("shared")
        }));
    }

    let mut contexts = Vec::new();
    for handle in handles {
        contexts.push(handle.await.unwrap());
    }

    // Exactly-once creation: every task saw the same context instance
    for ctx in &contexts[1..] {
        assert!(Arc::ptr_eq(&contexts[0], ctx));
    }

    // Interaction increments were serialized, none lost
    let ctx = engine.sessions().context("shared");
    assert_eq!(ctx.read().unwrap().interaction_count(), 16);

    // One session, counted once
    assert_eq!(engine.sessions().total_conversations(), 1);
    assert_eq!(engine.sessions().session_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_independent_sessions() {
    let engine = Arc::new(engine());
    let mut handles = Vec::new();

    for i in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let session = format!("session-{}", i);
            engine.process_message("Hello there!", &session);
            engine.process_message("What is Python?", &session);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = engine.stats();
    assert_eq!(stats.total_conversations, 8);
    assert_eq!(engine.sessions().session_count(), 8);
    // Two exchanges of two lines each, in every session
    assert_eq!(stats.average_conversation_length, 4.0);
    // Global learning state absorbed every exchange
    assert_eq!(engine.learning().training_log_len(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_knowledge_and_messages() {
    let engine = Arc::new(engine());
    let mut handles = Vec::new();

    for i in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine.add_knowledge(
                &format!("Question {}?", i),
                &format!("Answer {}", i),
                "generated",
            );
            engine.process_message("What is SQL?", &format!("kb-{}", i));
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // 14 seeded + 8 distinct inserted questions
    assert_eq!(engine.stats().knowledge_count, 22);
    assert_eq!(engine.learning().example_count("generated"), 8);
}

#[test]
fn test_entity_extraction_is_stable_through_pipeline() {
    let engine = engine();
    let text = "Email me at dev@example.com about python before 10:30";

    let first = engine.process_message(text, "s1");
    let second = engine.process_message(text, "s1");
    assert_eq!(first.entities, second.entities);
    assert!(first.entities.iter().any(|e| e.kind == EntityKind::Email));
}

#[test]
fn test_statistics_accuracy_moves_with_confidence() {
    let engine = engine();
    let before = engine.stats().model_accuracy;
    assert_eq!(before, 0.75);

    // High-confidence exchange nudges the smoothed accuracy upward
    engine.process_message("What is Java?", "s1");
    let after = engine.stats().model_accuracy;
    assert!(after > before);
}
