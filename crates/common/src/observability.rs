use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, Encoder, Histogram, IntCounter, TextEncoder,
};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "boost_relay_requests_total",
        "Total relay requests handled"
    )
    .expect("register requests_total")
});

pub static INPUT_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "boost_relay_input_rejected_total",
        "Requests rejected before any upstream call (missing fields, unknown service code)"
    )
    .expect("register input_rejected_total")
});

pub static ORDERS_PLACED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "boost_relay_orders_placed_total",
        "Orders successfully forwarded to the provider"
    )
    .expect("register orders_placed_total")
});

pub static UPSTREAM_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "boost_relay_upstream_requests_total",
        "Total calls issued to the provider API"
    )
    .expect("register upstream_requests_total")
});

pub static UPSTREAM_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "boost_relay_upstream_errors_total",
        "Provider calls that failed (transport, decode, or non-2xx status)"
    )
    .expect("register upstream_errors_total")
});

pub static UPSTREAM_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "boost_relay_upstream_duration_seconds",
        "Provider call duration in seconds",
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("register upstream_duration")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
