//! Metrics collection for observability

use crate::error::{EngineError, Result};
use prometheus::{
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_with_registry, Counter, CounterVec, Histogram, Opts, Registry,
};

/// Metrics collector
///
/// Owned by each engine instance rather than registered globally, so
/// independent engines report independently.
pub struct Metrics {
    registry: Registry,

    // Pipeline metrics
    pub messages_processed: CounterVec,
    pub intent_confidence: Histogram,
    pub fallback_responses: CounterVec,
    pub boundary_errors: Counter,

    // Knowledge / training metrics
    pub knowledge_inserts: Counter,
    pub faq_items_ingested: Counter,
}

impl Metrics {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let messages_processed = register_counter_vec_with_registry!(
            Opts::new("messages_processed_total", "Total messages processed"),
            &["intent"],
            registry
        )
        .map_err(|e| EngineError::Internal(format!("Failed to register metric: {}", e)))?;

        let intent_confidence = register_histogram_with_registry!(
            "intent_confidence",
            "Classifier confidence per message",
            registry
        )
        .map_err(|e| EngineError::Internal(format!("Failed to register metric: {}", e)))?;

        let fallback_responses = register_counter_vec_with_registry!(
            Opts::new(
                "fallback_responses_total",
                "Responses produced by each fallback strategy"
            ),
            &["strategy"],
            registry
        )
        .map_err(|e| EngineError::Internal(format!("Failed to register metric: {}", e)))?;

        let boundary_errors = register_counter_with_registry!(
            Opts::new(
                "boundary_errors_total",
                "Pipeline failures converted to the error reply"
            ),
            registry
        )
        .map_err(|e| EngineError::Internal(format!("Failed to register metric: {}", e)))?;

        let knowledge_inserts = register_counter_with_registry!(
            Opts::new("knowledge_inserts_total", "Single knowledge insertions"),
            registry
        )
        .map_err(|e| EngineError::Internal(format!("Failed to register metric: {}", e)))?;

        let faq_items_ingested = register_counter_with_registry!(
            Opts::new("faq_items_ingested_total", "FAQ items bulk-loaded"),
            registry
        )
        .map_err(|e| EngineError::Internal(format!("Failed to register metric: {}", e)))?;

        Ok(Self {
            registry,
            messages_processed,
            intent_confidence,
            fallback_responses,
            boundary_errors,
            knowledge_inserts,
            faq_items_ingested,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record one processed message
    pub fn record_message(&self, intent: &str, confidence: f64) {
        self.messages_processed.with_label_values(&[intent]).inc();
        self.intent_confidence.observe(confidence);
    }

    /// Record which fallback strategy produced the reply
    pub fn record_fallback(&self, strategy: &str) {
        self.fallback_responses.with_label_values(&[strategy]).inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
