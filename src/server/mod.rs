//! TCP server
//!
//! [`RelayServer`] accepts connections and gives each one a
//! [`Connection`](connection::Connection) sharing a single registry.

pub mod config;
pub mod connection;
pub mod listener;

pub use config::ServerConfig;
pub use listener::RelayServer;
