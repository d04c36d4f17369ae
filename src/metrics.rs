//! Operational metrics with Prometheus
//!
//! Exposes key counters for monitoring and alerting: entity lifecycle
//! operations, like/friend traffic, and popularity query latency.
//!
//! NOTE: We intentionally avoid user or film ids in metric labels to
//! prevent high-cardinality explosion that can crash Prometheus.

use lazy_static::lazy_static;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global metrics registry
    pub static ref METRICS_REGISTRY: Registry = Registry::new();

    /// User lifecycle operations (create/update/delete)
    pub static ref USER_OPS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("filmgraph_user_ops_total", "Total user lifecycle operations"),
        &["op", "result"]
    ).unwrap();

    /// Film lifecycle operations (create/update/delete)
    pub static ref FILM_OPS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("filmgraph_film_ops_total", "Total film lifecycle operations"),
        &["op", "result"]
    ).unwrap();

    /// Like/unlike operations
    pub static ref LIKE_OPS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("filmgraph_like_ops_total", "Total like/unlike operations"),
        &["op", "result"]
    ).unwrap();

    /// Friendship operations (add/delete/list/common)
    pub static ref FRIEND_OPS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("filmgraph_friend_ops_total", "Total friendship operations"),
        &["op", "result"]
    ).unwrap();

    /// Popularity query duration
    pub static ref POPULAR_QUERY_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "filmgraph_popular_query_duration_seconds",
            "Top-K popularity query duration"
        )
        .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01])
    ).unwrap();
}

/// Register all metrics with the global registry
///
/// Call once at startup. Double registration returns an error from
/// prometheus, which we ignore so tests can call this repeatedly.
pub fn register_metrics() {
    let _ = METRICS_REGISTRY.register(Box::new(USER_OPS_TOTAL.clone()));
    let _ = METRICS_REGISTRY.register(Box::new(FILM_OPS_TOTAL.clone()));
    let _ = METRICS_REGISTRY.register(Box::new(LIKE_OPS_TOTAL.clone()));
    let _ = METRICS_REGISTRY.register(Box::new(FRIEND_OPS_TOTAL.clone()));
    let _ = METRICS_REGISTRY.register(Box::new(POPULAR_QUERY_DURATION.clone()));
}

/// Label value for a successful operation
pub const RESULT_OK: &str = "ok";
/// Label value for a failed operation
pub const RESULT_ERROR: &str = "error";

/// Record an operation outcome on a counter family
pub fn observe_op(counter: &IntCounterVec, op: &str, ok: bool) {
    let result = if ok { RESULT_OK } else { RESULT_ERROR };
    counter.with_label_values(&[op, result]).inc();
}
