//! # alert-relay
//!
//! A line-oriented TCP publish/subscribe relay. Clients subscribe to named
//! events and any client can trigger an event, which sends an alert line to
//! every subscriber of that name.
//!
//! ```text
//! C: subscribe: news
//! S: Subscription to news confirmed
//! C: alertNoParam: news
//! S: alert: news
//! C: unsubscribe: news
//! S: Unsubscribed from news
//! ```
//!
//! All state lives in one [`SubscriptionRegistry`] shared by every
//! connection of a [`RelayServer`]. Nothing is persisted.
//!
//! ## Example
//!
//! ```no_run
//! use alert_relay::{RelayServer, ServerConfig};
//!
//! # async fn run() -> alert_relay::Result<()> {
//! let server = RelayServer::new(ServerConfig::default());
//! server.run_until(async {
//!     let _ = tokio::signal::ctrl_c().await;
//! }).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;

pub use error::{Error, Result};
pub use registry::{BroadcastReport, ConnectionHandle, ConnectionId, SubscriptionRegistry};
pub use server::{RelayServer, ServerConfig};
