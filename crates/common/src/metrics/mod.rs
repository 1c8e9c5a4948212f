//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Newsdesk metrics
pub const METRICS_PREFIX: &str = "newsdesk";

/// SLO-aligned histogram buckets for request latency (in seconds)
/// Targets: P50 < 50ms, P99 < 150ms
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms - P50 target
    0.075,  // 75ms
    0.100,  // 100ms
    0.150,  // 150ms - P99 target
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Publication metrics
    describe_counter!(
        format!("{}_submissions_total", METRICS_PREFIX),
        Unit::Count,
        "Total article submissions accepted into the pipeline"
    );

    describe_histogram!(
        format!("{}_publication_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Publication pipeline latency in seconds"
    );

    describe_counter!(
        format!("{}_artifacts_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total artifacts created, labelled by kind"
    );

    describe_counter!(
        format!("{}_partial_publications_total", METRICS_PREFIX),
        Unit::Count,
        "Publications that succeeded with a swallowed secondary failure"
    );

    // Lookup metrics
    describe_counter!(
        format!("{}_lookup_degradations_total", METRICS_PREFIX),
        Unit::Count,
        "Best-effort lookups that fell back to null, labelled by kind"
    );

    // Queue metrics
    describe_counter!(
        format!("{}_rewrite_jobs_enqueued_total", METRICS_PREFIX),
        Unit::Count,
        "Total rewrite jobs handed to the worker queue"
    );

    // Database metrics
    describe_gauge!(
        format!("{}_db_connections_active", METRICS_PREFIX),
        Unit::Count,
        "Active database connections"
    );

    describe_histogram!(
        format!("{}_db_query_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Database query latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a completed publication
pub fn record_publication(duration_secs: f64, ai_mode: &str, partial: bool, tenant_id: &str) {
    counter!(
        format!("{}_submissions_total", METRICS_PREFIX),
        "tenant" => tenant_id.to_string(),
        "ai_mode" => ai_mode.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_publication_duration_seconds", METRICS_PREFIX),
        "ai_mode" => ai_mode.to_string()
    )
    .record(duration_secs);

    if partial {
        counter!(format!("{}_partial_publications_total", METRICS_PREFIX)).increment(1);
    }
}

/// Helper to record artifact creation
pub fn record_artifact(kind: &str) {
    counter!(
        format!("{}_artifacts_created_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Helper to record a lookup that degraded to null
pub fn record_lookup_degradation(kind: &str) {
    counter!(
        format!("{}_lookup_degradations_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Helper to record a rewrite job handed to the queue
pub fn record_rewrite_enqueued(ai_mode: &str) {
    counter!(
        format!("{}_rewrite_jobs_enqueued_total", METRICS_PREFIX),
        "ai_mode" => ai_mode.to_string()
    )
    .increment(1);
}
