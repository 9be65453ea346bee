//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`ZabbixClient`](crate::ZabbixClient)
//! when observability is enabled through `ClientBuilder::with_observability()`.
//!
//! # Metrics Collected
//!
//! - **session_state**: 0 = disconnected, 1 = connected (gauge)
//! - **requests_total**: calls sent, by method and status (counter)
//! - **request_duration**: call latency in seconds, by method and status (histogram)
//! - **errors_total**: failed calls, by error kind and remote code (counter)
//!
//! # Examples
//!
//! ```rust,no_run
//! use zbxrpc_client::ClientMetrics;
//!
//! let metrics = ClientMetrics::new("user-sync");
//! metrics.record_request("user.get", "success", 0.042);
//! ```

use crate::session::SessionState;
use opentelemetry::{
    global,
    metrics::{Counter, Gauge, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    pub session_state: Gauge<i64>,
    pub requests_total: Counter<u64>,
    /// Seconds
    pub request_duration: Histogram<f64>,
    pub errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let meter = global::meter_with_scope(
            opentelemetry::InstrumentationScope::builder(service_name.into()).build(),
        );
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            session_state: meter
                .i64_gauge("zbxrpc.client.session.state")
                .with_description("Session state (0=disconnected, 1=connected)")
                .build(),
            requests_total: meter
                .u64_counter("zbxrpc.client.requests.total")
                .with_description("Total number of API calls sent")
                .build(),
            request_duration: meter
                .f64_histogram("zbxrpc.client.request.duration")
                .with_description("API call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("zbxrpc.client.errors.total")
                .with_description("Total number of failed API calls")
                .build(),
        }
    }

    pub fn update_session_state(&self, state: SessionState) {
        self.session_state.record(state.as_metric(), &[]);
    }

    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call; `code` is the remote error code, if any
    pub fn record_error(&self, kind: &str, code: Option<i32>) {
        let mut attributes = vec![KeyValue::new("error_type", kind.to_string())];
        if let Some(code) = code {
            attributes.push(KeyValue::new("code", i64::from(code)));
        }
        self.errors_total.add(1, &attributes);
    }
}
