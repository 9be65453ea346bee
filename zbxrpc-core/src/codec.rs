//! Codec for Zabbix JSON-RPC messages
//!
//! This module converts between typed Rust values and the JSON that travels
//! over the wire:
//!
//! - **Parameters**: `to_params()` turns any typed parameter bundle into the
//!   JSON value placed in the envelope's `params` member
//! - **Envelopes**: `encode_request()` produces the request body
//! - **Replies**: `decode_reply()` classifies a response body, and
//!   `into_result()` turns a classified reply into `Result<Value>`,
//!   dispatching remote errors through the [`crate::registry`]
//!
//! # Absent vs empty
//!
//! Typed bundles mark unset options as `Option::None` with
//! `skip_serializing_if`, so they never reach the wire. Explicit values that
//! happen to be empty (`""`, `0`, `[]`) are ordinary values and are always
//! emitted. Enumerations serialize as their wire value, both as map values
//! and as map keys.
//!
//! # Examples
//!
//! ```rust
//! use zbxrpc_core::codec;
//! use serde_json::json;
//!
//! let reply = codec::decode_reply(json!({"jsonrpc": "2.0", "result": "5.0.0", "id": "1"})).unwrap();
//! assert_eq!(codec::into_result(reply).unwrap(), json!("5.0.0"));
//! ```

use crate::error::{Error, JsonRpcErrorData, Result};
use crate::registry;
use crate::types::{Reply, ZabbixRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode any serializable message to a JSON string
///
/// # Errors
///
/// Returns `Error::Serialization` if the value cannot be represented as JSON.
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request envelope to a JSON string
pub fn encode_request(req: &ZabbixRequest) -> Result<String> {
    encode(req)
}

/// Serialize a typed parameter bundle into the envelope's `params` value
///
/// Object keys holding `null` are unset and dropped at every depth. Empty
/// strings, empty collections and zero are kept.
///
/// # Examples
///
/// ```rust
/// use zbxrpc_core::codec;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Params {
///     name: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     surname: Option<String>,
/// }
///
/// let value = codec::to_params(&Params { name: String::new(), surname: None }).unwrap();
/// assert_eq!(value, serde_json::json!({"name": ""}));
/// ```
pub fn to_params<T: Serialize + ?Sized>(params: &T) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(params).map_err(|e| Error::Serialization(e.to_string()))?;
    prune_unset(&mut value);
    Ok(value)
}

fn prune_unset(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_unset);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(prune_unset),
        _ => {}
    }
}

/// Decode a JSON value into a typed result
///
/// # Errors
///
/// Returns `Error::Serialization` if the value doesn't match the expected type.
pub fn decode_as<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Serialization(e.to_string()))
}

/// Classify a response body
///
/// # Classification
///
/// - an `error` member wins and is parsed as [`JsonRpcErrorData`]
/// - otherwise a `result` member yields `Reply::Result`
/// - anything else (including non-object bodies) is kept as `Reply::Raw`
///
/// # Errors
///
/// Returns `Error::Serialization` when the `error` member is not a valid
/// error record.
pub fn decode_reply(body: serde_json::Value) -> Result<Reply> {
    match body {
        serde_json::Value::Object(mut map) => {
            if let Some(error) = map.remove("error") {
                let record: JsonRpcErrorData = decode_as(error)?;
                Ok(Reply::Error(record))
            } else if let Some(result) = map.remove("result") {
                Ok(Reply::Result(result))
            } else {
                Ok(Reply::Raw(serde_json::Value::Object(map)))
            }
        }
        other => Ok(Reply::Raw(other)),
    }
}

/// Decode a response body from its JSON text
///
/// # Errors
///
/// Returns `Error::Transport` when the text is not JSON at all; the server
/// or a proxy in front of it sent something else entirely.
pub fn decode_reply_str(data: &str) -> Result<Reply> {
    let body: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| Error::Transport(format!("malformed JSON response: {}", e)))?;
    decode_reply(body)
}

/// Turn a classified reply into the call's outcome
///
/// Errors are dispatched to their registered kind; raw bodies are returned
/// whole.
pub fn into_result(reply: Reply) -> Result<serde_json::Value> {
    match reply {
        Reply::Result(value) | Reply::Raw(value) => Ok(value),
        Reply::Error(record) => Err(registry::dispatch(record)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Id, Method};
    use serde_json::json;

    #[test]
    fn test_encode_request() {
        let req = ZabbixRequest::new(Method::UserGet, json!({"output": "extend"}), Id::from("1"), Some("tok".into())).unwrap();
        let encoded = encode_request(&req).unwrap();

        assert!(encoded.contains("\"jsonrpc\":\"2.0\""));
        assert!(encoded.contains("\"method\":\"user.get\""));
        assert!(encoded.contains("\"auth\":\"tok\""));
        assert!(encoded.contains("\"id\":\"1\""));
    }

    #[test]
    fn test_encode_preserves_envelope_order() {
        let req = ZabbixRequest::new(Method::Login, json!({}), Id::from("1"), None).unwrap();
        let encoded = encode_request(&req).unwrap();

        let positions: Vec<usize> = ["jsonrpc", "method", "params", "id", "auth"]
            .iter()
            .map(|key| encoded.find(&format!("\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_decode_result() {
        let reply = decode_reply(json!({"jsonrpc": "2.0", "result": [{"userid": "1"}], "id": "1"})).unwrap();
        assert_eq!(reply, Reply::Result(json!([{"userid": "1"}])));
    }

    #[test]
    fn test_decode_null_result() {
        let reply = decode_reply(json!({"jsonrpc": "2.0", "result": null, "id": "1"})).unwrap();
        assert_eq!(reply, Reply::Result(serde_json::Value::Null));
    }

    #[test]
    fn test_decode_error() {
        let reply = decode_reply(json!({
            "jsonrpc": "2.0",
            "error": {"code": -32602, "message": "Invalid params.", "data": "Incorrect user name."},
            "id": "1"
        }))
        .unwrap();

        match reply {
            Reply::Error(e) => {
                assert_eq!(e.code, -32602);
                assert_eq!(e.detail(), "Incorrect user name.");
            }
            other => panic!("Expected error reply, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_wins_over_result() {
        let reply = decode_reply(json!({"result": 1, "error": {"code": -32603, "message": "x"}})).unwrap();
        assert!(reply.is_error());
    }

    #[test]
    fn test_decode_malformed_error_record() {
        let result = decode_reply(json!({"error": "not an object"}));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_decode_raw_fallback() {
        let body = json!({"jsonrpc": "2.0", "id": "1"});
        let reply = decode_reply(body.clone()).unwrap();
        assert_eq!(reply, Reply::Raw(body.clone()));
        assert_eq!(into_result(reply).unwrap(), body);
    }

    #[test]
    fn test_decode_non_object_is_raw() {
        let reply = decode_reply(json!([1, 2, 3])).unwrap();
        assert_eq!(reply, Reply::Raw(json!([1, 2, 3])));
    }

    #[test]
    fn test_decode_reply_str_invalid_json() {
        let result = decode_reply_str("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[test]
    fn test_into_result_dispatches_errors() {
        let reply = Reply::Error(JsonRpcErrorData::new(-32601, "Method not found."));
        assert!(matches!(into_result(reply), Err(Error::MethodNotFound(_))));

        let reply = Reply::Error(JsonRpcErrorData::new(-32000, "Server error"));
        match into_result(reply) {
            Err(Error::Remote(e)) => assert_eq!(e.code, -32000),
            other => panic!("Expected Remote, got {:?}", other),
        }
    }

    #[test]
    fn test_to_params_keeps_empty_values() {
        let value = to_params(&json!({"name": "", "medias": [], "severity": 0})).unwrap();
        assert_eq!(value["name"], "");
        assert_eq!(value["medias"], json!([]));
        assert_eq!(value["severity"], 0);
    }

    #[test]
    fn test_to_params_drops_unset_keys() {
        #[derive(Serialize)]
        struct Media {
            mediatypeid: String,
            period: Option<String>,
        }
        #[derive(Serialize)]
        struct Bundle {
            userid: String,
            surname: Option<String>,
            user_medias: Vec<Media>,
        }

        let bundle = Bundle {
            userid: "5".to_string(),
            surname: None,
            user_medias: vec![Media { mediatypeid: "1".to_string(), period: None }],
        };
        assert_eq!(
            to_params(&bundle).unwrap(),
            json!({"userid": "5", "user_medias": [{"mediatypeid": "1"}]})
        );

        let value = to_params(&json!({"x": null, "filter": {"alias": null, "name": ""}})).unwrap();
        assert_eq!(value, json!({"filter": {"name": ""}}));
    }

    #[test]
    fn test_decode_as_wrong_type() {
        let result: Result<Vec<String>> = decode_as(json!({"userids": ["1"]}));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
