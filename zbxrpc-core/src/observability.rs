//! Logging and OpenTelemetry setup
//!
//! Every layer of zbxrpc reports through `tracing`: session transitions at
//! info, envelopes at debug, rejected logouts at warn and remote errors at
//! error. Nothing is printed until the application installs a subscriber,
//! which [`init_observability`] does:
//!
//! - a `tracing-subscriber` fmt layer (JSON lines or plain text) behind an
//!   `EnvFilter`
//! - optionally, span export over OTLP/gRPC through `tracing-opentelemetry`
//! - optionally, a global OTLP meter provider, picked up by the client's
//!   `ClientMetrics`
//!
//! ```rust,no_run
//! use zbxrpc_core::ObservabilityConfig;
//!
//! # fn main() -> Result<(), zbxrpc_core::observability::ObservabilityError> {
//! let config = ObservabilityConfig::new("user-sync").with_log_level("zbxrpc_client=debug,info");
//! zbxrpc_core::init_observability(config)?;
//!
//! // ... talk to Zabbix ...
//!
//! zbxrpc_core::shutdown_observability();
//! # Ok(())
//! # }
//! ```
//!
//! `OTEL_EXPORTER_OTLP_ENDPOINT`, `OTEL_SERVICE_NAME` and `RUST_LOG` are read by
//! [`ObservabilityConfig::from_env`].

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use std::sync::OnceLock;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";
pub const DEFAULT_SERVICE_NAME: &str = "zbxrpc";

const METRICS_INTERVAL: Duration = Duration::from_secs(30);

static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();
static METER_PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

/// Failure to install logging or telemetry
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    #[error("cannot build OTLP {signal} exporter: {reason}")]
    Exporter { signal: &'static str, reason: String },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// What [`init_observability`] installs
///
/// `Default` uses fixed values; [`ObservabilityConfig::new`] and
/// [`ObservabilityConfig::from_env`] also consult the environment.
///
/// ```rust
/// use zbxrpc_core::ObservabilityConfig;
///
/// let config = ObservabilityConfig::default()
///     .with_endpoint("http://collector:4317")
///     .with_metrics(false);
/// assert!(config.enable_traces && !config.enable_metrics);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub service_version: String,
    /// OTLP/gRPC collector
    pub otlp_endpoint: String,
    pub enable_traces: bool,
    pub enable_metrics: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            enable_traces: true,
            enable_metrics: true,
            log_level: "info".to_string(),
            json_logs: true,
        }
    }
}

impl ObservabilityConfig {
    /// Environment-derived settings under an explicit service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Self::from_env()
        }
    }

    /// Defaults overridden by `OTEL_SERVICE_NAME`, `OTEL_EXPORTER_OTLP_ENDPOINT`
    /// and `RUST_LOG`
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or(defaults.otlp_endpoint),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            ..defaults
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = endpoint.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    pub fn with_traces(mut self, enable: bool) -> Self {
        self.enable_traces = enable;
        self
    }

    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Plain text logs, for terminals
    pub fn with_text_logs(mut self) -> Self {
        self.json_logs = false;
        self
    }

    fn filter(&self) -> Result<EnvFilter, ObservabilityError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .map_err(|e| ObservabilityError::Filter {
                directive: self.log_level.clone(),
                reason: e.to_string(),
            })
    }

    fn resource(&self) -> Resource {
        Resource::builder_empty()
            .with_attributes([
                KeyValue::new(SERVICE_NAME, self.service_name.clone()),
                KeyValue::new(SERVICE_VERSION, self.service_version.clone()),
            ])
            .build()
    }
}

/// Install the log subscriber and the enabled OTLP pipelines
///
/// Only one global subscriber can exist per process; a second call fails with
/// [`ObservabilityError::AlreadyInstalled`].
pub fn init_observability(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let filter = config.filter()?;

    let tracer = if config.enable_traces {
        let provider = tracer_provider(&config)?;
        let tracer = provider.tracer(config.service_name.clone());
        global::set_tracer_provider(provider.clone());
        let _ = TRACER_PROVIDER.set(provider);
        Some(tracer)
    } else {
        None
    };

    if config.enable_metrics {
        let provider = meter_provider(&config)?;
        global::set_meter_provider(provider.clone());
        let _ = METER_PROVIDER.set(provider);
    }

    let json_layer = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().with_target(true).json());
    let text_layer = (!config.json_logs).then(|| tracing_subscriber::fmt::layer().with_target(true));
    let otel_layer = tracer.map(|t| tracing_opentelemetry::layer().with_tracer(t));

    tracing_subscriber::registry()
        .with(otel_layer)
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|_| ObservabilityError::AlreadyInstalled)?;

    tracing::info!(
        service = %config.service_name,
        endpoint = %config.otlp_endpoint,
        traces = config.enable_traces,
        metrics = config.enable_metrics,
        "Observability initialized"
    );
    Ok(())
}

fn tracer_provider(config: &ObservabilityConfig) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()
        .map_err(|e| ObservabilityError::Exporter {
            signal: "span",
            reason: e.to_string(),
        })?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(config.resource())
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .build())
}

fn meter_provider(config: &ObservabilityConfig) -> Result<SdkMeterProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()
        .map_err(|e| ObservabilityError::Exporter {
            signal: "metric",
            reason: e.to_string(),
        })?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(METRICS_INTERVAL)
        .build();

    Ok(SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(config.resource())
        .build())
}

/// Flush pending spans and metrics and stop the exporters
///
/// Safe to call when nothing was installed.
pub fn shutdown_observability() {
    tracing::info!("Shutting down observability");

    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
    if let Some(provider) = METER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Meter provider shutdown failed");
        }
    }
}
