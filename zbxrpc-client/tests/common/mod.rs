//! Common test utilities for zbxrpc-client integration tests
//!
//! `MockZabbix` is an in-memory `Transport` that answers like a Zabbix
//! frontend: it checks credentials and tokens, keeps a user table and
//! returns Zabbix's error codes. Its state is shared, so a test keeps a
//! handle after moving a clone into the client.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use zbxrpc_client::{Transport, TransportResponse, ZabbixClient, API_PATH};
use zbxrpc_core::{Error, Result};

pub const ADMIN_USER: &str = "Admin";
pub const ADMIN_PASSWORD: &str = "zabbix";
pub const API_VERSION: &str = "5.0.0";

#[derive(Default)]
struct State {
    open: bool,
    opens: usize,
    closes: usize,
    requests: Vec<Value>,
    tokens: HashSet<String>,
    issued: u64,
    users: Vec<Value>,
    next_userid: u64,
    overrides: HashMap<String, Value>,
    fail_logout: bool,
    fail_close: bool,
}

/// In-memory Zabbix frontend
#[derive(Clone)]
pub struct MockZabbix {
    state: Arc<Mutex<State>>,
}

impl MockZabbix {
    /// A server holding only the built-in `Admin` user (id "1")
    pub fn new() -> Self {
        let mock = Self {
            state: Arc::new(Mutex::new(State {
                next_userid: 2,
                ..State::default()
            })),
        };
        mock.state().users.push(json!({
            "userid": "1",
            "alias": ADMIN_USER,
            "name": "Zabbix",
            "surname": "Administrator",
            "url": "",
            "autologin": "1",
            "autologout": "0",
            "lang": "en_GB",
            "refresh": "30s",
            "type": "3",
            "theme": "default",
            "attempt_failed": "0",
            "attempt_ip": "",
            "attempt_clock": "0",
            "rows_per_page": "50"
        }));
        mock
    }

    /// A disconnected client talking to this server with valid credentials
    pub fn client(&self) -> ZabbixClient {
        ZabbixClient::with_transport(Box::new(self.clone()), ADMIN_USER, ADMIN_PASSWORD)
    }

    /// A disconnected client with the given credentials
    pub fn client_as(&self, user: &str, password: &str) -> ZabbixClient {
        ZabbixClient::with_transport(Box::new(self.clone()), user, password)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn opens(&self) -> usize {
        self.state().opens
    }

    pub fn closes(&self) -> usize {
        self.state().closes
    }

    pub fn transport_open(&self) -> bool {
        self.state().open
    }

    pub fn active_tokens(&self) -> usize {
        self.state().tokens.len()
    }

    /// Every request body received, in order
    pub fn requests(&self) -> Vec<Value> {
        self.state().requests.clone()
    }

    /// The most recent request for `method`
    pub fn last_request(&self, method: &str) -> Option<Value> {
        self.state()
            .requests
            .iter()
            .rev()
            .find(|r| r["method"] == method)
            .cloned()
    }

    pub fn user_count(&self) -> usize {
        self.state().users.len()
    }

    /// Answer every call to `method` with `body` verbatim
    pub fn set_response(&self, method: &str, body: Value) {
        self.state().overrides.insert(method.to_string(), body);
    }

    /// Make `user.logout` fail with an application error
    pub fn fail_logout(&self) {
        self.state().fail_logout = true;
    }

    /// Make every transport close report an error after closing
    pub fn fail_close(&self) {
        self.state().fail_close = true;
    }

    fn handle(&self, request: &Value) -> Value {
        let mut state = self.state();
        state.requests.push(request.clone());

        let method = request["method"].as_str().unwrap_or_default().to_string();
        let id = request["id"].clone();
        let params = request["params"].clone();
        let auth = request["auth"].as_str().map(str::to_string);

        if let Some(body) = state.overrides.get(&method) {
            return body.clone();
        }

        let outcome = match method.as_str() {
            "user.login" => {
                if params["user"] == ADMIN_USER && params["password"] == ADMIN_PASSWORD {
                    state.issued += 1;
                    let token = format!("{:032x}", state.issued);
                    state.tokens.insert(token.clone());
                    Ok(json!(token))
                } else {
                    Err(invalid_params("Login name or password is incorrect."))
                }
            }
            _ if !auth.as_ref().map_or(false, |t| state.tokens.contains(t)) => {
                Err(invalid_params("Not authorised."))
            }
            "appinfo.version" => Ok(json!(API_VERSION)),
            "user.logout" => {
                if state.fail_logout {
                    Err((-32500, "Application error.".to_string(), "Logout refused.".to_string()))
                } else {
                    if let Some(token) = auth {
                        state.tokens.remove(&token);
                    }
                    Ok(json!(true))
                }
            }
            "user.get" => Ok(user_get(&state.users, &params)),
            "user.create" => user_create(&mut state, &params),
            "user.update" => user_update(&mut state, &params),
            "user.delete" => user_delete(&mut state, &params),
            other => Err((
                -32601,
                "Method not found.".to_string(),
                format!("Incorrect method \"{}\".", other),
            )),
        };

        match outcome {
            Ok(result) => mock_response(id, result),
            Err((code, message, data)) => mock_error_response(id, code, &message, &data),
        }
    }
}

#[async_trait]
impl Transport for MockZabbix {
    async fn open(&mut self) -> Result<()> {
        let mut state = self.state();
        state.open = true;
        state.opens += 1;
        Ok(())
    }

    async fn post(&mut self, path: &str, body: &Value) -> Result<TransportResponse> {
        if !self.state().open {
            return Err(Error::NotConnected);
        }
        if path != API_PATH {
            return Ok(TransportResponse::new(404, json!({"message": "Not Found"})));
        }
        Ok(TransportResponse::ok(self.handle(body)))
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.state();
        state.open = false;
        state.closes += 1;
        if state.fail_close {
            return Err(Error::Transport("connection reset during close".to_string()));
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state().open
    }
}

type Fault = (i32, String, String);

fn invalid_params(data: &str) -> Fault {
    (-32602, "Invalid params.".to_string(), data.to_string())
}

fn ids_of(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(id) => Some(vec![id.clone()]),
        Value::Array(ids) => Some(ids.iter().filter_map(|v| v.as_str().map(str::to_string)).collect()),
        _ => None,
    }
}

fn user_get(users: &[Value], params: &Value) -> Value {
    let wanted = ids_of(&params["userids"]);
    let filter = params["filter"].as_object().cloned().unwrap_or_default();

    let matches = users
        .iter()
        .filter(|u| {
            wanted
                .as_ref()
                .map_or(true, |ids| ids.iter().any(|id| u["userid"] == id.as_str()))
        })
        .filter(|u| filter.iter().all(|(field, expected)| &u[field] == expected))
        .cloned()
        .collect();

    Value::Array(matches)
}

const USER_FIELDS: &[&str] = &[
    "alias",
    "name",
    "surname",
    "url",
    "autologin",
    "autologout",
    "lang",
    "refresh",
    "rows_per_page",
    "theme",
    "type",
];

fn user_create(state: &mut State, params: &Value) -> std::result::Result<Value, Fault> {
    let alias = params["alias"].as_str().unwrap_or_default();
    if state.users.iter().any(|u| u["alias"] == alias) {
        return Err(invalid_params(&format!("User with alias \"{}\" already exists.", alias)));
    }

    let userid = state.next_userid.to_string();
    state.next_userid += 1;

    let mut user = Map::new();
    user.insert("userid".into(), json!(userid));
    for field in USER_FIELDS {
        user.insert(field.to_string(), params[*field].clone());
    }
    user.insert("attempt_failed".into(), json!("0"));
    user.insert("attempt_ip".into(), json!(""));
    user.insert("attempt_clock".into(), json!("0"));
    state.users.push(Value::Object(user));

    Ok(json!({"userids": [userid]}))
}

fn user_update(state: &mut State, params: &Value) -> std::result::Result<Value, Fault> {
    let userid = params["userid"].as_str().unwrap_or_default().to_string();
    let user = state
        .users
        .iter_mut()
        .find(|u| u["userid"] == userid.as_str())
        .ok_or_else(|| invalid_params("No permissions to referred object or it does not exist!"))?;

    for field in USER_FIELDS {
        if let Some(value) = params.get(*field) {
            user[*field] = value.clone();
        }
    }

    Ok(json!({"userids": [userid]}))
}

fn user_delete(state: &mut State, params: &Value) -> std::result::Result<Value, Fault> {
    let ids = match params {
        Value::Array(_) => ids_of(params).unwrap_or_default(),
        _ => return Err(invalid_params("Invalid parameter \"/\": an array is expected.")),
    };

    if !ids.iter().all(|id| state.users.iter().any(|u| u["userid"] == id.as_str())) {
        return Err(invalid_params("No permissions to referred object or it does not exist!"));
    }

    state.users.retain(|u| !ids.iter().any(|id| u["userid"] == id.as_str()));
    Ok(json!({"userids": ids}))
}

/// Helper to create a Zabbix success response
pub fn mock_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id
    })
}

/// Helper to create a Zabbix error response
pub fn mock_error_response(id: Value, code: i32, message: &str, data: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {
            "code": code,
            "message": message,
            "data": data
        },
        "id": id
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_response_format() {
        let response = mock_response(json!("1"), json!({"userids": ["2"]}));
        assert_eq!(response["jsonrpc"], "2.0");
        assert_eq!(response["id"], "1");
        assert_eq!(response["result"]["userids"][0], "2");
    }

    #[test]
    fn test_mock_error_response_format() {
        let response = mock_error_response(json!("1"), -32602, "Invalid params.", "Not authorised.");
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["data"], "Not authorised.");
        assert!(response.get("result").is_none());
    }

    #[test]
    fn test_mock_seeded_with_admin() {
        let mock = MockZabbix::new();
        assert_eq!(mock.user_count(), 1);
        assert!(!mock.transport_open());
    }
}
