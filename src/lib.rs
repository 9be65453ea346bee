//! zbxrpc - typed client for the Zabbix JSON-RPC management API
//!
//! This is the convenience crate that re-exports the zbxrpc sub-crates.
//!
//! # Architecture
//!
//! - **zbxrpc-core**: envelope types, codec, error taxonomy, observability
//! - **zbxrpc-model**: users, user groups, media and media types
//! - **zbxrpc-client**: HTTP transport and the session client
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbxrpc::model::UserGet;
//! use zbxrpc::ZabbixClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ZabbixClient::new("https://zabbix.example.com", "Admin", "zabbix")?;
//!     client.connect().await?;
//!
//!     if let Some(admin) = client.get_users(UserGet::by_id("1")).await?.into_single() {
//!         println!("{:?}", admin.alias);
//!     }
//!
//!     client.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub use zbxrpc_client as client;
pub use zbxrpc_core as core;
pub use zbxrpc_model as model;

pub use zbxrpc_client::{ClientBuilder, Lookup, ZabbixClient};
pub use zbxrpc_core::{Error, Result};
