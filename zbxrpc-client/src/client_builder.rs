//! Client builder for configuring credentials, transport and observability
//!
//! # Examples
//!
//! ```rust,no_run
//! use zbxrpc_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> zbxrpc_core::Result<()> {
//! // Explicit configuration
//! let client = ClientBuilder::new("https://zabbix.example.com")
//!     .credentials("Admin", "zabbix")
//!     .timeout(Duration::from_secs(10))
//!     .connect()
//!     .await?;
//!
//! // From ZABBIX_URL, ZABBIX_USER and ZABBIX_PASSWORD, with telemetry
//! let client2 = ClientBuilder::from_env()?
//!     .with_default_observability()
//!     .service_name("user-sync")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::http::HttpTransport;
use crate::transport::Transport;
use crate::{ClientMetrics, ZabbixClient};
use std::sync::Arc;
use std::time::Duration;
use zbxrpc_core::{Error, ObservabilityConfig, Result};

/// Environment variable holding the API base URL
pub const ENV_URL: &str = "ZABBIX_URL";
/// Environment variable holding the login name
pub const ENV_USER: &str = "ZABBIX_USER";
/// Environment variable holding the password
pub const ENV_PASSWORD: &str = "ZABBIX_PASSWORD";

/// Builder for configuring and creating a ZabbixClient
pub struct ClientBuilder {
    url: String,
    user: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Box<dyn Transport>>,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a builder for the API at `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
            timeout: None,
            transport: None,
            observability_config: None,
            service_name: None,
        }
    }

    /// Create a builder from `ZABBIX_URL`, `ZABBIX_USER` and `ZABBIX_PASSWORD`
    ///
    /// # Errors
    ///
    /// `Error::Config` naming the first variable that is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| Error::Config(format!("{} is not set", key)))
        };

        Ok(Self::new(require(ENV_URL)?).credentials(require(ENV_USER)?, require(ENV_PASSWORD)?))
    }

    /// Set the login name and password used by `connect`
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Limit the duration of each HTTP request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom transport instead of HTTP; the URL is then unused
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::from_env());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build a disconnected client
    ///
    /// # Errors
    ///
    /// `Error::Config` when credentials are missing, the URL is invalid or
    /// observability cannot be initialized.
    pub fn build(self) -> Result<ZabbixClient> {
        let (user, password) = match (self.user, self.password) {
            (Some(user), Some(password)) => (user, password),
            _ => return Err(Error::Config("credentials are not set".to_string())),
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut http = HttpTransport::new(&self.url)?;
                if let Some(timeout) = self.timeout {
                    http = http.with_timeout(timeout);
                }
                Box::new(http)
            }
        };

        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            zbxrpc_core::init_observability(config.clone())
                .map_err(|e| Error::Config(format!("Failed to initialize observability: {}", e)))?;

            Some(Arc::new(ClientMetrics::new(config.service_name.clone())))
        } else {
            None
        };

        tracing::debug!(url = %self.url, %user, "Client built");
        Ok(ZabbixClient::with_transport(transport, user, password).with_metrics(metrics))
    }

    /// Build the client and connect it
    pub async fn connect(self) -> Result<ZabbixClient> {
        let mut client = self.build()?;
        client.connect().await?;
        Ok(client)
    }
}
