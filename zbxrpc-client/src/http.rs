//! HTTP transport built on reqwest

use crate::transport::{Transport, TransportResponse, CONTENT_TYPE};
use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;
use zbxrpc_core::{Error, Result};

/// Posts JSON-RPC bodies to a Zabbix frontend
///
/// The base URL may carry a sub-path (`https://example.com/zabbix`); endpoint
/// paths are resolved below it.
#[derive(Debug)]
pub struct HttpTransport {
    base: Url,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl HttpTransport {
    /// Create a transport for the API at `base_url`
    ///
    /// # Errors
    ///
    /// `Error::Config` when the URL does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid URL {:?}: {}", base_url, e)))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Invalid scheme for HTTP transport: {}",
                base.scheme()
            )));
        }

        // Url::join replaces the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            timeout: None,
            client: None,
        })
    }

    /// Limit the duration of each request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Full URL of `path` below the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid endpoint path {:?}: {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(&mut self) -> Result<()> {
        if self.client.is_some() {
            return Ok(());
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("zbxrpc/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;
        self.client = Some(client);
        Ok(())
    }

    async fn post(&mut self, path: &str, body: &Value) -> Result<TransportResponse> {
        let url = self.endpoint(path)?;
        let client = self.client.as_ref().ok_or(Error::NotConnected)?;

        let payload = serde_json::to_vec(body)?;
        debug!(url = %url, bytes = payload.len(), "POST");

        let response = client
            .post(url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let body = serde_json::from_slice(&bytes).map_err(|e| {
            Error::Transport(format!("HTTP {}: malformed JSON response: {}", status, e))
        })?;

        Ok(TransportResponse::new(status, body))
    }

    async fn close(&mut self) -> Result<()> {
        self.client = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::API_PATH;

    #[test]
    fn test_endpoint_at_root() {
        let transport = HttpTransport::new("http://zabbix.local").unwrap();
        assert_eq!(
            transport.endpoint(API_PATH).unwrap().as_str(),
            "http://zabbix.local/api_jsonrpc.php"
        );
    }

    #[test]
    fn test_endpoint_keeps_sub_path() {
        let transport = HttpTransport::new("https://example.com/zabbix").unwrap();
        assert_eq!(
            transport.endpoint(API_PATH).unwrap().as_str(),
            "https://example.com/zabbix/api_jsonrpc.php"
        );

        let transport = HttpTransport::new("https://example.com/zabbix/").unwrap();
        assert_eq!(
            transport.endpoint("/api_jsonrpc.php").unwrap().as_str(),
            "https://example.com/zabbix/api_jsonrpc.php"
        );
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(HttpTransport::new("not a url"), Err(Error::Config(_))));
        assert!(matches!(HttpTransport::new("ws://zabbix.local"), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_open_close() {
        let mut transport = HttpTransport::new("http://zabbix.local")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert!(!transport.is_open());

        transport.open().await.unwrap();
        assert!(transport.is_open());

        transport.close().await.unwrap();
        assert!(!transport.is_open());
    }

    #[tokio::test]
    async fn test_post_while_closed() {
        let mut transport = HttpTransport::new("http://zabbix.local").unwrap();
        let result = transport.post(API_PATH, &serde_json::json!({})).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }
}
