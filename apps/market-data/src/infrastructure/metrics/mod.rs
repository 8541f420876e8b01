//! Metrics
//!
//! Counters and histograms for exchange traffic and fail-soft fetches.
//! Recording is a no-op until the host process installs a `metrics`
//! recorder.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Exchange HTTP requests, labelled by endpoint and outcome.
pub const EXCHANGE_REQUESTS_TOTAL: &str = "market_data_exchange_requests_total";

/// Exchange HTTP request latency, labelled by endpoint.
pub const EXCHANGE_REQUEST_SECONDS: &str = "market_data_exchange_request_seconds";

/// Fail-soft facade operations that swallowed an error.
pub const FETCH_FAILURES_TOTAL: &str = "market_data_fetch_failures_total";

/// Register metric descriptions with the installed recorder.
pub fn register_metrics() {
    describe_counter!(
        EXCHANGE_REQUESTS_TOTAL,
        "Total HTTP requests sent to the exchange"
    );
    describe_histogram!(
        EXCHANGE_REQUEST_SECONDS,
        metrics::Unit::Seconds,
        "Exchange HTTP request latency"
    );
    describe_counter!(
        FETCH_FAILURES_TOTAL,
        "Market data fetches that failed and returned an empty result"
    );
}

/// Record one exchange request.
pub fn record_exchange_request(endpoint: &'static str, outcome: &'static str, elapsed: Duration) {
    counter!(EXCHANGE_REQUESTS_TOTAL, "endpoint" => endpoint, "outcome" => outcome).increment(1);
    histogram!(EXCHANGE_REQUEST_SECONDS, "endpoint" => endpoint).record(elapsed.as_secs_f64());
}

/// Record a swallowed failure in a fail-soft operation.
pub fn record_fetch_failure(operation: &'static str) {
    counter!(FETCH_FAILURES_TOTAL, "operation" => operation).increment(1);
}


#[cfg(test)]
mod tests {
    use super::testing::CountingRecorder;
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        register_metrics();
        record_exchange_request("klines", "success", Duration::from_millis(5));
        record_fetch_failure("fetch_current_price");
    }

    #[test]
    fn fetch_failures_are_counted_per_operation() {
        let recorder = CountingRecorder::default();
        metrics::with_local_recorder(&recorder, || {
            record_fetch_failure("fetch_current_price");
            record_fetch_failure("fetch_current_price");
            record_fetch_failure("fetch_daily_stats");
        });

        assert_eq!(
            recorder.count(FETCH_FAILURES_TOTAL, "operation", "fetch_current_price"),
            2
        );
        assert_eq!(
            recorder.count(FETCH_FAILURES_TOTAL, "operation", "fetch_daily_stats"),
            1
        );
    }
}
