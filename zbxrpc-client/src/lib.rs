//! Zabbix JSON-RPC client with scoped sessions
//!
//! # Core Features
//!
//! - **Sessions**: login on connect, logout and transport release on disconnect
//! - **Scoped sessions**: `scoped()` disconnects on every exit path
//! - **Typed user API**: get, create, update and delete users
//! - **Error dispatch**: remote error codes become specific `Error` variants
//! - **Pluggable transport**: HTTP by default, any `Transport` for tests
//! - **Observability**: tracing spans everywhere, optional OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbxrpc_client::ZabbixClient;
//! use zbxrpc_model::{Media, UserCreate, UserGet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ZabbixClient::new("https://zabbix.example.com", "Admin", "zabbix")?;
//!     client.connect().await?;
//!
//!     println!("API version {}", client.version().await?);
//!
//!     let user = client
//!         .create_user(&UserCreate::new("jdoe", "s3cret", ["7"]).with_media(Media::new("1", "jdoe@example.com")))
//!         .await?;
//!
//!     let found = client.get_users(UserGet::by_id(&user.userid)).await?;
//!     assert!(!found.is_not_found());
//!
//!     client.delete_user(user.userid.as_str()).await?;
//!     client.disconnect().await?;
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod http;
mod lookup;
mod metrics;
mod session;
mod transport;

pub use client::ZabbixClient;
pub use client_builder::{ClientBuilder, ENV_PASSWORD, ENV_URL, ENV_USER};
pub use http::HttpTransport;
pub use lookup::Lookup;
pub use metrics::ClientMetrics;
pub use session::SessionState;
pub use transport::{Transport, TransportResponse, API_PATH, CONTENT_TYPE};
