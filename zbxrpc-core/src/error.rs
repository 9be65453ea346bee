//! Error types for zbxrpc
//!
//! This module provides error handling for calls against the Zabbix JSON-RPC
//! API. It defines two main types:
//!
//! - **Error**: Application-level errors returned by every zbxrpc operation (uses thiserror)
//! - **JsonRpcErrorData**: The `{code, message, data}` record found in a faulty response
//!
//! # Error Kinds
//!
//! Remote failures are mapped to a specific `Error` variant by their numeric
//! code (see [`crate::registry`]). Codes without a registered kind become
//! `Error::Remote`, which carries the record verbatim.
//!
//! Codes understood by the Zabbix API:
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (also used for duplicates and rejected logins)
//! - `-32603`: Internal error
//! - `-32500`: Application error
//!
//! # Examples
//!
//! ```rust
//! use zbxrpc_core::{registry, Error, JsonRpcErrorData};
//!
//! let record = JsonRpcErrorData::with_data(-32602, "Invalid params.", "User with alias \"bob\" already exists.");
//! match registry::dispatch(record) {
//!     Error::InvalidParams(e) => assert_eq!(e.detail(), "User with alias \"bob\" already exists."),
//!     other => panic!("unexpected error: {}", other),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric error codes used by the Zabbix JSON-RPC API
pub mod codes {
    /// Invalid JSON was received by the server
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist or is not available
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameters
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Zabbix application error
    pub const APPLICATION_ERROR: i32 = -32500;
}

/// Result type for zbxrpc operations
///
/// This is a convenience type alias that uses the zbxrpc `Error` type.
/// Used throughout the zbxrpc crates for consistent error handling.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-level error type for zbxrpc operations
///
/// # Error Categories
///
/// - **Remote errors**: ParseError, InvalidRequest, MethodNotFound, InvalidParams,
///   InternalError, Application, Remote. Each carries the record sent by the server.
/// - **Session errors**: Authentication, NotConnected, NotAuthenticated
/// - **Transport errors**: Transport
/// - **Processing errors**: Serialization, Config, MissingEntity
///
/// Callers match on the specific variant for expected failures (a duplicate
/// alias is `InvalidParams`) and fall back to [`Error::code`] for the rest.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The server could not parse the request (-32700)
    #[error("Parse error: {0}")]
    ParseError(JsonRpcErrorData),

    /// The request object was malformed (-32600)
    #[error("Invalid request: {0}")]
    InvalidRequest(JsonRpcErrorData),

    /// The method is unknown to the server (-32601)
    #[error("Method not found: {0}")]
    MethodNotFound(JsonRpcErrorData),

    /// The method rejected its parameters (-32602)
    ///
    /// Zabbix also reports business rule violations with this code, such as
    /// creating a user whose alias already exists.
    #[error("Invalid params: {0}")]
    InvalidParams(JsonRpcErrorData),

    /// The server failed while executing the method (-32603)
    #[error("Internal error: {0}")]
    InternalError(JsonRpcErrorData),

    /// Zabbix application error (-32500)
    #[error("Application error: {0}")]
    Application(JsonRpcErrorData),

    /// Any remote error without a registered kind
    ///
    /// The code, message and data are kept exactly as received.
    #[error("Remote error: {0}")]
    Remote(JsonRpcErrorData),

    /// The server rejected the configured credentials during login
    #[error("Authentication failed: {0}")]
    Authentication(JsonRpcErrorData),

    /// A call was issued while the session is disconnected
    #[error("Not connected")]
    NotConnected,

    /// A call that needs an authentication token was built without one
    #[error("Method {method} requires an authentication token")]
    NotAuthenticated {
        /// The method that was about to be sent
        method: String,
    },

    /// Transport failure (connection refused, malformed response body, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization or deserialization error
    ///
    /// Occurs when converting between Rust types and JSON, usually because
    /// the server returned a shape the entity model does not expect.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A follow-up lookup after a mutation found nothing
    #[error("{kind} {id} not found after mutation")]
    MissingEntity {
        /// Entity kind, e.g. "user"
        kind: &'static str,
        /// Identifier returned by the mutation
        id: String,
    },
}

impl Error {
    /// The remote error record, if this error came from the server
    pub fn remote(&self) -> Option<&JsonRpcErrorData> {
        match self {
            Error::ParseError(e)
            | Error::InvalidRequest(e)
            | Error::MethodNotFound(e)
            | Error::InvalidParams(e)
            | Error::InternalError(e)
            | Error::Application(e)
            | Error::Remote(e)
            | Error::Authentication(e) => Some(e),
            _ => None,
        }
    }

    /// The remote error code, if this error came from the server
    pub fn code(&self) -> Option<i32> {
        self.remote().map(|e| e.code)
    }

    /// Whether the error was reported by the server (as opposed to local/transport)
    pub fn is_remote(&self) -> bool {
        self.remote().is_some()
    }

    /// Short snake_case name of the variant, used as a log and metric label
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ParseError(_) => "parse_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::MethodNotFound(_) => "method_not_found",
            Error::InvalidParams(_) => "invalid_params",
            Error::InternalError(_) => "internal_error",
            Error::Application(_) => "application",
            Error::Remote(_) => "remote",
            Error::Authentication(_) => "authentication",
            Error::NotConnected => "not_connected",
            Error::NotAuthenticated { .. } => "not_authenticated",
            Error::Transport(_) => "transport",
            Error::Serialization(_) => "serialization",
            Error::Config(_) => "config",
            Error::MissingEntity { .. } => "missing_entity",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// JSON-RPC error record as sent by the server
///
/// This structure is the exact wire format found in the `error` member of a
/// faulty response. Zabbix always sends `data` as a human-readable string
/// with the details ("Login name or password is incorrect."), while `message`
/// is the generic text for the code ("Invalid params.").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code indicating the error type
    pub code: i32,

    /// Short description of the error class
    #[serde(default)]
    pub message: String,

    /// Additional error information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create a new error record with code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a new error record with a detail payload
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zbxrpc_core::JsonRpcErrorData;
    ///
    /// let error = JsonRpcErrorData::with_data(-32602, "Invalid params.", "Incorrect user name.");
    /// assert_eq!(error.detail(), "Incorrect user name.");
    /// ```
    pub fn with_data(
        code: i32,
        message: impl Into<String>,
        data: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data.into()),
        }
    }

    /// The detail text carried in `data`
    ///
    /// String payloads are returned as-is, other JSON values in their compact
    /// encoding, and a missing payload as an empty string.
    pub fn detail(&self) -> String {
        match &self.data {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message detail", e.g.
    /// `[-32602] Invalid params. User with alias "bob" already exists.`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let detail = self.detail();
        if !detail.is_empty() {
            write!(f, " {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for JsonRpcErrorData {}
