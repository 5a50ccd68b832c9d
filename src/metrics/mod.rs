//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_with_registry, CounterVec, Histogram,
    Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> =
    Lazy::new(|| Arc::new(Metrics::new().expect("Failed to initialize metrics")));

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    /// Recommendation outcomes by status (ok, no_match, index_unavailable,
    /// generation_failed)
    pub recommend_requests: CounterVec,
    /// Similarity search duration in seconds
    pub search_duration: Histogram,
    /// Completion call duration in seconds
    pub generation_duration: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let recommend_requests = register_counter_vec_with_registry!(
            Opts::new(
                "recommend_requests_total",
                "Total recommendation requests by outcome"
            ),
            &["status"],
            registry
        )?;

        let search_duration = register_histogram_with_registry!(
            "search_duration_seconds",
            "Similarity search duration in seconds",
            registry
        )?;

        let generation_duration = register_histogram_with_registry!(
            "generation_duration_seconds",
            "Completion model call duration in seconds",
            registry
        )?;

        Ok(Self {
            registry,
            recommend_requests,
            search_duration,
            generation_duration,
        })
    }

    /// Render all registered metrics in Prometheus text exposition format
    pub fn export(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder.encode(&self.registry.gather(), &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
