//! Session client for the Zabbix API
//!
//! `ZabbixClient` owns one transport and at most one authentication token.
//!
//! # Client Lifecycle
//!
//! 1. **Connect**: open the transport, `user.login`, keep the token
//! 2. **Use**: typed calls carry the token in every envelope
//! 3. **Disconnect**: best-effort `user.logout`, drop the token, close the transport
//!
//! [`ZabbixClient::scoped`] runs a body between connect and disconnect and
//! disconnects on every exit path.
//!
//! # Concurrency
//!
//! Every call takes `&mut self`: one client is one sequential session.
//! Use one client per task.

use crate::http::HttpTransport;
use crate::lookup::Lookup;
use crate::metrics::ClientMetrics;
use crate::session::{Session, SessionState};
use crate::transport::{Transport, API_PATH};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use zbxrpc_core::{codec, Error, Id, Method, Result, ZabbixRequest};
use zbxrpc_model::{Ids, User, UserCreate, UserGet, UserIds, UserLogin, UserUpdate};

/// Client for one Zabbix API session
pub struct ZabbixClient {
    transport: Box<dyn Transport>,
    user: String,
    password: String,
    session: Session,
    request_counter: u64,
    metrics: Option<Arc<ClientMetrics>>,
}

impl ZabbixClient {
    /// Create a disconnected client for the API at `url` over HTTP
    ///
    /// # Errors
    ///
    /// `Error::Config` when `url` is not a valid http(s) URL.
    pub fn new(url: &str, user: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let transport = HttpTransport::new(url)?;
        Ok(Self::with_transport(Box::new(transport), user, password))
    }

    /// Create a disconnected client over a custom transport
    pub fn with_transport(
        transport: Box<dyn Transport>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            user: user.into(),
            password: password.into(),
            session: Session::default(),
            request_counter: 0,
            metrics: None,
        }
    }

    pub(crate) fn with_metrics(mut self, metrics: Option<Arc<ClientMetrics>>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// The login name used by `connect`
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Open the transport and log in
    ///
    /// Connecting an already connected client does nothing.
    ///
    /// # Errors
    ///
    /// - `Error::Authentication` when the server rejects the credentials
    /// - `Error::Transport` when the server cannot be reached
    ///
    /// The transport is released again before any error is returned.
    #[tracing::instrument(skip(self), fields(user = %self.user))]
    pub async fn connect(&mut self) -> Result<()> {
        if self.session.is_connected() {
            tracing::debug!("Already connected");
            return Ok(());
        }

        tracing::info!("Connecting to Zabbix");
        self.transport.open().await?;

        match self.login().await {
            Ok(token) => {
                self.session.connected(token);
                self.record_state();
                tracing::info!("Connected");
                Ok(())
            }
            Err(err) => {
                // the login error wins over a failed close
                if let Err(close_err) = self.release().await {
                    tracing::debug!(error = %close_err, "Transport close failed after login failure");
                }
                let record = err.remote().cloned();
                let err = match record {
                    Some(record) => Error::Authentication(record),
                    None => err,
                };
                tracing::error!(error = %err, "Login failed");
                Err(err)
            }
        }
    }

    /// Log out and release the transport
    ///
    /// A failed logout is logged, not returned: the token is dropped and the
    /// transport closed regardless. Disconnecting a disconnected client does
    /// nothing.
    #[tracing::instrument(skip(self), fields(user = %self.user))]
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.session.is_connected() {
            return Ok(());
        }

        if let Err(e) = self.send(Method::Logout, json!({})).await {
            tracing::warn!(error = %e, "Logout failed, releasing session anyway");
        }

        self.session.disconnected();
        self.record_state();
        let released = self.release().await;
        tracing::info!("Disconnected");
        released
    }

    /// Run `body` inside a session
    ///
    /// Connects if needed, runs the body, then disconnects whatever the body
    /// returned. An error from the body wins over an error from disconnecting.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use futures::FutureExt;
    /// use zbxrpc_client::ZabbixClient;
    ///
    /// # async fn example() -> zbxrpc_core::Result<()> {
    /// let mut client = ZabbixClient::new("https://zabbix.example.com", "Admin", "zabbix")?;
    /// let users = client
    ///     .scoped(|zabbix| async move { zabbix.list_users().await }.boxed())
    ///     .await?;
    /// println!("{} users", users.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scoped<T, F>(&mut self, body: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a mut ZabbixClient) -> BoxFuture<'a, Result<T>>,
    {
        self.connect().await?;
        let outcome = body(self).await;
        let released = self.disconnect().await;

        match outcome {
            Err(e) => {
                if let Err(ref release_err) = released {
                    tracing::warn!(error = %release_err, "Disconnect failed after scoped error");
                }
                Err(e)
            }
            Ok(value) => released.map(|_| value),
        }
    }

    /// Call any catalogue method with typed parameters and result
    ///
    /// # Errors
    ///
    /// - `Error::NotConnected` outside a session
    /// - the registered error kind when the server answers with an error
    /// - `Error::Serialization` when the result does not fit `R`
    #[tracing::instrument(skip(self, params), fields(method = %method))]
    pub async fn request<P, R>(&mut self, method: Method, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.ensure_connected()?;
        let params = codec::to_params(params)?;
        let result = self.send(method, params).await?;
        codec::decode_as(result)
    }

    /// API version of the server (`appinfo.version`)
    pub async fn version(&mut self) -> Result<String> {
        self.request(Method::ApiVersion, &json!({})).await
    }

    /// `user.get`
    ///
    /// Without parameters every user is returned. The shape of the result
    /// follows the request: a scalar `userids` gives [`Lookup::One`], which
    /// is `None` when the user does not exist; otherwise [`Lookup::Many`].
    pub async fn get_users(&mut self, params: impl Into<Option<UserGet>>) -> Result<Lookup<User>> {
        let params = params.into().unwrap_or_default();
        let users: Vec<User> = self.request(Method::UserGet, &params).await?;

        Ok(if params.is_single() {
            Lookup::One(users.into_iter().next())
        } else {
            Lookup::Many(users)
        })
    }

    /// One user by id, `None` when it does not exist
    pub async fn get_user(&mut self, userid: impl Into<String>) -> Result<Option<User>> {
        Ok(self.get_users(UserGet::by_id(userid)).await?.into_single())
    }

    /// Every user
    pub async fn list_users(&mut self) -> Result<Vec<User>> {
        Ok(self.get_users(UserGet::new()).await?.into_vec())
    }

    /// `user.create`, then read the new user back
    ///
    /// # Errors
    ///
    /// `Error::InvalidParams` when the alias is taken; `Error::MissingEntity`
    /// when the created user cannot be read back.
    #[tracing::instrument(skip(self, params), fields(alias = %params.alias))]
    pub async fn create_user(&mut self, params: &UserCreate) -> Result<User> {
        let ids: UserIds = self.request(Method::UserCreate, params).await?;
        self.fetch_mutated(ids).await
    }

    /// `user.update`, then read the user back
    #[tracing::instrument(skip(self, params), fields(userid = %params.userid))]
    pub async fn update_user(&mut self, params: &UserUpdate) -> Result<User> {
        let ids: UserIds = self.request(Method::UserUpdate, params).await?;
        self.fetch_mutated(ids).await
    }

    /// `user.delete` for one id or several; returns the deleted ids
    ///
    /// Ids are always sent as a list, so `"5"` and `vec!["5"]` produce the
    /// same request.
    pub async fn delete_user(&mut self, userids: impl Into<Ids>) -> Result<Vec<String>> {
        let userids = userids.into().into_vec();
        let deleted: UserIds = self.request(Method::UserDelete, &userids).await?;
        Ok(deleted.userids)
    }

    async fn fetch_mutated(&mut self, ids: UserIds) -> Result<User> {
        let userid = ids
            .userids
            .into_iter()
            .next()
            .ok_or_else(|| Error::Serialization("mutation returned no user ids".to_string()))?;

        self.get_user(userid.clone())
            .await?
            .ok_or(Error::MissingEntity { kind: "user", id: userid })
    }

    async fn login(&mut self) -> Result<String> {
        let params = codec::to_params(&UserLogin::new(self.user.clone(), self.password.clone()))?;
        let token = self.send(Method::Login, params).await?;
        codec::decode_as(token)
    }

    async fn release(&mut self) -> Result<()> {
        let closed = self.transport.close().await;
        if let Err(ref e) = closed {
            tracing::warn!(error = %e, "Failed to close transport");
        }
        closed
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.session.is_connected() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    fn next_id(&mut self) -> Id {
        self.request_counter += 1;
        Id::from(self.request_counter.to_string())
    }

    fn record_state(&self) {
        if let Some(ref m) = self.metrics {
            m.update_session_state(self.session.state());
        }
    }

    /// Build the envelope, post it and unwrap the reply
    async fn send(&mut self, method: Method, params: Value) -> Result<Value> {
        let start = Instant::now();
        let id = self.next_id();
        let request = ZabbixRequest::new(method, params, id, self.session.token().map(str::to_string))?;
        let body = serde_json::to_value(&request)?;

        tracing::debug!(method = %method, id = %request.id, "Sending request");
        let outcome = self.exchange(&body).await;
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method.as_str(), "success", duration);
                }
                tracing::debug!(method = %method, duration, "Request succeeded");
            }
            Err(e) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method.as_str(), "error", duration);
                    m.record_error(e.kind(), e.code());
                }
                if e.is_remote() {
                    tracing::error!(method = %method, code = ?e.code(), error = %e, "Remote error");
                } else {
                    tracing::error!(method = %method, error = %e, "Request failed");
                }
            }
        }

        outcome
    }

    async fn exchange(&mut self, body: &Value) -> Result<Value> {
        let response = self.transport.post(API_PATH, body).await?;
        let status = response.status;
        let success = response.is_success();

        let reply = codec::decode_reply(response.body)?;
        if !success && !reply.is_error() {
            return Err(Error::Transport(format!("HTTP status {}", status)));
        }

        codec::into_result(reply)
    }
}

impl fmt::Debug for ZabbixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZabbixClient")
            .field("user", &self.user)
            .field("session", &self.session)
            .field("transport_open", &self.transport.is_open())
            .finish()
    }
}
