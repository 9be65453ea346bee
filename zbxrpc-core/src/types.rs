//! JSON-RPC 2.0 types used to talk to the Zabbix API
//!
//! Zabbix speaks plain JSON-RPC 2.0 with one addition: every request carries
//! an `auth` member holding the session token, or `null` for `user.login`.
//!
//! # Message Types
//!
//! 1. **ZabbixRequest**: the outgoing envelope `{jsonrpc, method, params, id, auth}`
//! 2. **Reply**: the classified response body (result, error, or anything else)
//!
//! # Request IDs
//!
//! Request IDs correlate a response with its request. The client sends
//! string IDs; numbers and null are accepted when decoding.

use crate::error::{Error, JsonRpcErrorData, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON protocol version sent in every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
///
/// Serialized as the bare inner value (`"7"`, `7` or `null`).
///
/// # Examples
///
/// ```rust
/// use zbxrpc_core::Id;
///
/// let id1: Id = "req-123".into();
/// let id2: Id = 42i64.into();
///
/// assert_eq!(id1.to_string(), "\"req-123\"");
/// assert_eq!(id2.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier
    String(String),
    /// Numeric identifier
    Number(i64),
    /// Null identifier
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

/// The Zabbix API methods this library calls
///
/// `as_str()` gives the wire name. `requires_auth()` tells whether the
/// envelope must carry a session token: only `user.login` is anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `appinfo.version`
    ApiVersion,
    /// `user.login`
    Login,
    /// `user.logout`
    Logout,
    /// `user.get`
    UserGet,
    /// `user.create`
    UserCreate,
    /// `user.update`
    UserUpdate,
    /// `user.delete`
    UserDelete,
}

impl Method {
    /// Every method in the catalogue
    pub const ALL: &'static [Method] = &[
        Method::ApiVersion,
        Method::Login,
        Method::Logout,
        Method::UserGet,
        Method::UserCreate,
        Method::UserUpdate,
        Method::UserDelete,
    ];

    /// The method name sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::ApiVersion => "appinfo.version",
            Method::Login => "user.login",
            Method::Logout => "user.logout",
            Method::UserGet => "user.get",
            Method::UserCreate => "user.create",
            Method::UserUpdate => "user.update",
            Method::UserDelete => "user.delete",
        }
    }

    /// Whether the call must carry an authentication token
    ///
    /// Only `user.login` goes out without one.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Method::Login)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::Config(format!("unknown method {:?}", s)))
    }
}

/// Outgoing JSON-RPC envelope
///
/// # Wire Format
///
/// ```json
/// {"jsonrpc":"2.0","method":"user.get","params":{"output":"extend"},"id":"1","auth":"0424bd59b807674191e7d77572075f33"}
/// ```
///
/// `auth` is always present; it is `null` only for `user.login`. The
/// constructor enforces the token invariant, so an envelope for a method that
/// needs a token cannot exist without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZabbixRequest {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Wire name of the method to invoke
    pub method: String,
    /// Method parameters (object or array)
    pub params: serde_json::Value,
    /// Request identifier
    pub id: Id,
    /// Session token, `null` for `user.login`
    pub auth: Option<String>,
}

impl ZabbixRequest {
    /// Build an envelope for `method`
    ///
    /// The token is dropped for `user.login` and required for every other
    /// method.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` when `method` requires a token and
    /// `auth` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zbxrpc_core::{Id, Method, ZabbixRequest};
    /// use serde_json::json;
    ///
    /// let login = ZabbixRequest::new(Method::Login, json!({"user": "Admin", "password": "zabbix"}), Id::from("1"), None).unwrap();
    /// assert!(login.auth.is_none());
    ///
    /// assert!(ZabbixRequest::new(Method::UserGet, json!({}), Id::from("2"), None).is_err());
    /// ```
    pub fn new(method: Method, params: serde_json::Value, id: Id, auth: Option<String>) -> Result<Self> {
        let auth = if method.requires_auth() {
            Some(auth.ok_or_else(|| Error::NotAuthenticated {
                method: method.as_str().to_string(),
            })?)
        } else {
            None
        };

        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.as_str().to_string(),
            params,
            id,
            auth,
        })
    }
}

/// Classified response body
///
/// A Zabbix response carries either `result` or `error`. Bodies with neither
/// member are kept whole as `Raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Successful call, holding the `result` member
    Result(serde_json::Value),
    /// Failed call, holding the `error` member
    Error(JsonRpcErrorData),
    /// Body with neither `result` nor `error`
    Raw(serde_json::Value),
}

impl Reply {
    /// Returns true for the `Result` variant
    pub fn is_result(&self) -> bool {
        matches!(self, Reply::Result(_))
    }

    /// Returns true for the `Error` variant
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}
