//! Transport seam between the session client and the network
//!
//! The client only needs to post a JSON body to a path below the API base
//! URL and read back a JSON body. [`HttpTransport`](crate::HttpTransport) does
//! this over HTTP; tests plug in an in-memory server.

use async_trait::async_trait;
use serde_json::Value;
use zbxrpc_core::Result;

/// Path of the JSON-RPC endpoint, relative to the API base URL
pub const API_PATH: &str = "api_jsonrpc.php";

/// Content type of every request body
pub const CONTENT_TYPE: &str = "application/json-rpc";

/// A response as received by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code (200 for transports without a status notion)
    pub status: u16,
    /// Decoded JSON body
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// A 200 response carrying `body`
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request/response channel to a Zabbix server
///
/// A transport is opened by `connect` and closed exactly once by `disconnect`
/// (or by a failed `connect`). `post` is only called while open.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Acquire the underlying resources
    async fn open(&mut self) -> Result<()>;

    /// Post `body` to `path` below the base URL and return the JSON response
    ///
    /// # Errors
    ///
    /// `Error::Transport` when the server is unreachable or does not answer
    /// with JSON; `Error::NotConnected` when the transport is closed.
    async fn post(&mut self, path: &str, body: &Value) -> Result<TransportResponse>;

    /// Release the underlying resources
    async fn close(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;
}
