//! Subscription registry
//!
//! The registry is the only state shared between connections. It records
//! which connection wants which event and fans alerts out to them.
//!
//! # Architecture
//!
//! ```text
//!                    Arc<SubscriptionRegistry>
//!               ┌───────────────────────────────┐
//!               │ Mutex<Vec<Subscription {      │
//!               │   connection: Handle { tx },  │
//!               │   event,                      │
//!               │ }>>                           │
//!               └───────────────┬───────────────┘
//!                               │
//!       ┌───────────────────────┼───────────────────────┐
//!       │                       │                       │
//!       ▼                       ▼                       ▼
//! [Connection A]          [Connection B]          [Connection C]
//! "alertNoParam: x"       writer task             writer task
//!       │                       ▲                       ▲
//!       └──► registry.broadcast()──► handle.send() ─────┘──► TCP
//! ```
//!
//! Handles only queue bytes, so holding the lock while writing never waits
//! on a slow socket.

pub mod entry;
pub mod handle;
pub mod store;

pub use entry::Subscription;
pub use handle::{ConnectionHandle, ConnectionId};
pub use store::{BroadcastReport, SubscriptionRegistry};
