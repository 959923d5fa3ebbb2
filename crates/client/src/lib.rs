//! Client for path-addressed configuration stores.
//!
//! The store holds a tree of named nodes and is driven through a small
//! request/response API: every request carries one or more elementary
//! operations (show, set, delete) on space-delimited paths, and every response
//! is an envelope with either `data` or an `error` message.
//!
//! ## Layers
//!
//! - [`Transport`]: moves encoded requests; [`HttpTransport`] posts them as
//!   form data.
//! - [`Connection`]: serializes operations, keeps one exchange in flight at a
//!   time and decodes the envelope.
//! - [`ConfigService`]: whole-tree operations built on the flattened
//!   `(path, value)` view from [`cfgtree_primitives`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use cfgtree_client::{Client, ClientConfig};
//!
//! # async fn run() -> eyre::Result<()> {
//! let config = ClientConfig::new("https://192.0.2.1".parse()?, "api-key");
//! let client = Client::from_config(&config)?;
//!
//! client.config().set("service ssh port", "2222").await?;
//!
//! let port = client.config().show("service ssh port").await?;
//! assert_eq!(port.as_deref(), Some("2222"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod errors;
pub mod http;
pub mod transport;


pub use cfgtree_primitives as primitives;
pub use client::{Client, ConfigService};
pub use config::ClientConfig;
pub use connection::Connection;
pub use errors::{is_empty_path_error, ClientError, ProtocolError};
pub use http::{HttpError, HttpTransport};
pub use transport::{Transport, TransportRequest};
pub use url::Url;
