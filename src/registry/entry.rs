//! Subscription entries

use super::handle::{ConnectionHandle, ConnectionId};

/// One binding of a connection to an event name
#[derive(Debug, Clone)]
pub struct Subscription {
    /// Where alerts for this subscription are written
    pub connection: ConnectionHandle,
    /// Case-sensitive event name, never empty
    pub event: String,
}

impl Subscription {
    /// Create a new subscription
    pub fn new(connection: ConnectionHandle, event: impl Into<String>) -> Self {
        Self {
            connection,
            event: event.into(),
        }
    }

    /// Id of the subscribed connection
    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id()
    }

    /// Whether this entry belongs to `id`
    pub fn is_for(&self, id: ConnectionId) -> bool {
        self.connection.id() == id
    }

    /// Whether this entry belongs to `id` and names `event`
    pub fn matches(&self, id: ConnectionId, event: &str) -> bool {
        self.is_for(id) && self.event == event
    }
}
