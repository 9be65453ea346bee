//! Core JSON-RPC types, codec and error taxonomy for zbxrpc
//!
//! This crate holds everything about talking to the Zabbix API that does not
//! depend on a particular transport or entity:
//!
//! - **Types**: the request envelope, the method catalogue and reply classification
//! - **Codec**: parameter serialization and response decoding
//! - **Error handling**: the `Error` enum and the code-to-kind registry
//! - **Observability**: tracing subscriber and OpenTelemetry setup
//!
//! # Example
//!
//! ```rust
//! use zbxrpc_core::{codec, Error, Id, Method, ZabbixRequest};
//! use serde_json::json;
//!
//! let request = ZabbixRequest::new(Method::UserGet, json!({"output": "extend"}), Id::from("1"), Some("token".into())).unwrap();
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.contains("\"method\":\"user.get\""));
//!
//! let reply = codec::decode_reply(json!({"error": {"code": -32602, "message": "Invalid params.", "data": "Not authorized."}})).unwrap();
//! assert!(matches!(codec::into_result(reply), Err(Error::InvalidParams(_))));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod registry;
pub mod types;

pub use error::{codes, Error, JsonRpcErrorData, Result};
pub use observability::{
    init_observability, shutdown_observability, ObservabilityConfig, ObservabilityError,
};
pub use types::{Id, Method, Reply, ZabbixRequest, JSONRPC_VERSION};
