//! Prometheus metrics for the ledger (default registry).

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

pub static LEDGER_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "phylactery_ledger_requests_total",
        "Ledger requests by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register ledger_requests_total")
});

pub static LEDGER_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "phylactery_ledger_query_duration_seconds",
        "Ledger store query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register ledger_query_duration")
});

/// Count one handled request.
pub fn record_request(operation: &str, outcome: &str) {
    LEDGER_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Record how long a store query took.
pub fn observe_query(operation: &str, elapsed: std::time::Duration) {
    LEDGER_QUERY_DURATION
        .with_label_values(&[operation])
        .observe(elapsed.as_secs_f64());
}

/// Render the default registry in the text exposition format.
pub fn gather_text() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
