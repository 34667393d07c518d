// Metrics module for observability
// Provides counters and histograms for requests and lock operations

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};

use mutex_common::LockOperation;

/// Initialize all metric descriptions
/// Should be called once at application startup
pub fn init_metrics() {
    // HTTP request metrics
    describe_counter!(
        "http_requests_total",
        "Total number of HTTP requests received"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP requests answered with a 4xx/5xx status"
    );

    // Lock metrics
    describe_counter!(
        "lock_operations_total",
        "Total number of lock registry operations by outcome"
    );

    tracing::info!("Metrics initialized");
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string()).increment(1);
    histogram!("http_request_duration_seconds", "method" => method.to_string(), "path" => path.to_string()).record(duration_secs);

    if status >= 400 {
        counter!("http_requests_errors_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string()).increment(1);
    }
}

/// Record a lock registry operation and its outcome label
pub fn record_lock_operation(operation: LockOperation, outcome: &'static str) {
    counter!("lock_operations_total", "operation" => operation.as_str(), "outcome" => outcome)
        .increment(1);
}

/// Timer helper for measuring request duration
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
