//! Error-kind registry
//!
//! Maps the numeric code of a remote error record to a specific [`Error`]
//! variant. Each known kind is declared exactly once, as one row of a static
//! table; dispatch is a scan over that table. Codes without a row fall back
//! to [`Error::Remote`], which carries code, message and data verbatim.
//!
//! Adding a kind means adding a variant to [`Error`] and one row to `KINDS`.

use crate::error::{codes, Error, JsonRpcErrorData};

/// Constructor for a registered error kind
pub type ErrorConstructor = fn(JsonRpcErrorData) -> Error;

/// Registered error kinds, keyed by code
static KINDS: &[(i32, ErrorConstructor)] = &[
    (codes::PARSE_ERROR, Error::ParseError),
    (codes::INVALID_REQUEST, Error::InvalidRequest),
    (codes::METHOD_NOT_FOUND, Error::MethodNotFound),
    (codes::INVALID_PARAMS, Error::InvalidParams),
    (codes::INTERNAL_ERROR, Error::InternalError),
    (codes::APPLICATION_ERROR, Error::Application),
];

/// Look up the constructor registered for `code`
pub fn lookup(code: i32) -> Option<ErrorConstructor> {
    KINDS
        .iter()
        .find(|(registered, _)| *registered == code)
        .map(|(_, constructor)| *constructor)
}

/// Whether `code` has a registered error kind
pub fn is_registered(code: i32) -> bool {
    lookup(code).is_some()
}

/// All registered codes, in declaration order
pub fn registered_codes() -> impl Iterator<Item = i32> {
    KINDS.iter().map(|(code, _)| *code)
}

/// Turn a remote error record into the matching [`Error`] kind
///
/// # Examples
///
/// ```rust
/// use zbxrpc_core::{registry, Error, JsonRpcErrorData};
///
/// let error = registry::dispatch(JsonRpcErrorData::new(-32000, "Server error"));
/// assert!(matches!(error, Error::Remote(ref e) if e.code == -32000));
/// ```
pub fn dispatch(record: JsonRpcErrorData) -> Error {
    match lookup(record.code) {
        Some(constructor) => constructor(record),
        None => Error::Remote(record),
    }
}
