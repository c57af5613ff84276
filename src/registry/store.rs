//! Subscription registry implementation
//!
//! The single shared store of subscriptions. Every operation holds the one
//! exclusive lock for its whole scan/mutate step, so no operation ever sees
//! another half done.

use tokio::sync::Mutex;

use super::entry::Subscription;
use super::handle::{ConnectionHandle, ConnectionId};
use crate::protocol::response;

/// Outcome of a broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscriptions whose event name matched
    pub matched: usize,
    /// Alerts successfully queued (matched minus closed connections)
    pub delivered: usize,
}

/// Registry of (connection, event name) subscriptions
///
/// Insertion order is kept and drives the write order of a broadcast.
/// Duplicates are allowed: subscribing twice yields two entries and two
/// alerts per broadcast.
///
/// Writes only queue bytes on the connection's outbound channel, so they
/// never block while the lock is held. A write to a closed connection is
/// dropped without affecting other recipients.
pub struct SubscriptionRegistry {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl SubscriptionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe `conn` to `event`
    ///
    /// The confirmation line is sent after the lock is released.
    pub async fn subscribe(&self, conn: &ConnectionHandle, event: &str) {
        {
            let mut subs = self.subscriptions.lock().await;
            subs.push(Subscription::new(conn.clone(), event));

            tracing::info!(
                connection_id = %conn.id(),
                event = event,
                subscriptions = subs.len(),
                "Subscriber added"
            );
        }

        deliver(conn, response::subscribed(event));
    }

    /// Remove every subscription of `conn` named `event`
    ///
    /// Sends one confirmation per removed entry. Returns how many were
    /// removed; zero is not an error and sends nothing.
    pub async fn unsubscribe(&self, conn: &ConnectionHandle, event: &str) -> usize {
        let mut subs = self.subscriptions.lock().await;
        let id = conn.id();

        let before = subs.len();
        subs.retain(|sub| !sub.matches(id, event));
        let removed = before - subs.len();

        for _ in 0..removed {
            deliver(conn, response::unsubscribed(event));
        }

        tracing::info!(
            connection_id = %id,
            event = event,
            removed = removed,
            subscriptions = subs.len(),
            "Subscriptions remaining"
        );

        removed
    }

    /// Remove every subscription of the given connection
    ///
    /// Used on disconnect; never writes to the connection.
    pub async fn unsubscribe_all(&self, id: ConnectionId) -> usize {
        let mut subs = self.subscriptions.lock().await;

        let before = subs.len();
        subs.retain(|sub| !sub.is_for(id));
        let removed = before - subs.len();

        tracing::info!(
            connection_id = %id,
            removed = removed,
            subscriptions = subs.len(),
            "Subscriptions remaining"
        );

        removed
    }

    /// Send an alert for `event` to every matching subscription, in order
    pub async fn broadcast(&self, event: &str) -> BroadcastReport {
        let subs = self.subscriptions.lock().await;
        let mut report = BroadcastReport::default();

        for sub in subs.iter().filter(|sub| sub.event == event) {
            report.matched += 1;
            if deliver(&sub.connection, response::alert(event)) {
                report.delivered += 1;
            }
        }

        tracing::info!(
            event = event,
            matched = report.matched,
            delivered = report.delivered,
            "Alerting"
        );

        report
    }

    /// Total number of subscriptions
    pub async fn len(&self) -> usize {
        self.subscriptions.lock().await.len()
    }

    /// Whether there are no subscriptions at all
    pub async fn is_empty(&self) -> bool {
        self.subscriptions.lock().await.is_empty()
    }

    /// Number of entries for one (connection, event name) pair
    pub async fn count_for(&self, id: ConnectionId, event: &str) -> usize {
        self.subscriptions
            .lock()
            .await
            .iter()
            .filter(|sub| sub.matches(id, event))
            .count()
    }

    /// Copy of the current subscriptions in insertion order
    pub async fn snapshot(&self) -> Vec<(ConnectionId, String)> {
        self.subscriptions
            .lock()
            .await
            .iter()
            .map(|sub| (sub.connection_id(), sub.event.clone()))
            .collect()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort write; failures are logged and swallowed
fn deliver(conn: &ConnectionHandle, line: bytes::Bytes) -> bool {
    match conn.send(line) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(connection_id = %conn.id(), error = %e, "Dropped write");
            false
        }
    }
}
