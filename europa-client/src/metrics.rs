//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`RpcClient`](crate::RpcClient)
//! when metrics are attached through the builder. Instruments come from the
//! global meter provider; with no provider installed they are no-ops.
//!
//! # Metrics Collected
//!
//! - **requests_total**: calls issued, by method and outcome (counter)
//! - **request_duration**: call latency in seconds (histogram)
//! - **errors_total**: failed calls, by error kind (counter)
//! - **timeouts_total**: calls aborted by their timer (counter)
//! - **batch_size**: requests per batch call (histogram)

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};

/// Client metrics for monitoring service calls
pub struct ClientMetrics {
    pub requests_total: Counter<u64>,
    /// Seconds from send to decoded response
    pub request_duration: Histogram<f64>,
    pub errors_total: Counter<u64>,
    pub timeouts_total: Counter<u64>,
    pub batch_size: Histogram<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter named after the service
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into()).build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    /// Create metrics on a caller-supplied meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("europa.client.requests.total")
                .with_description("Total number of JSON-RPC calls issued")
                .build(),
            request_duration: meter
                .f64_histogram("europa.client.request.duration")
                .with_description("JSON-RPC call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("europa.client.errors.total")
                .with_description("Total number of failed JSON-RPC calls")
                .build(),
            timeouts_total: meter
                .u64_counter("europa.client.timeouts.total")
                .with_description("Total number of calls aborted by timeout")
                .build(),
            batch_size: meter
                .u64_histogram("europa.client.batch.size")
                .with_description("Number of requests in batch calls")
                .build(),
        }
    }

    /// Record a completed call; `status` is `success`, `error` or `failed`
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    pub fn record_error(&self, kind: &str) {
        let attributes = &[KeyValue::new("error_kind", kind.to_string())];
        self.errors_total.add(1, attributes);
    }

    pub fn record_timeout(&self) {
        self.timeouts_total.add(1, &[]);
    }

    pub fn record_batch(&self, size: u64) {
        self.batch_size.record(size, &[]);
    }
}

impl std::fmt::Debug for ClientMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientMetrics").finish_non_exhaustive()
    }
}
