//! Connection handles
//!
//! The registry never owns a connection. It holds a [`ConnectionHandle`],
//! which only knows how to queue bytes for the connection's writer task.
//! Dropping every handle does not close the socket; the transport does that.

use std::net::SocketAddr;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Process-unique identifier of an accepted connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wrap a raw id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning write handle to a live connection
///
/// Cheap to clone. All clones feed the same outbound queue, so lines from
/// different clones arrive in the order they were queued.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    peer_addr: SocketAddr,
    tx: mpsc::UnboundedSender<Bytes>,
}

impl ConnectionHandle {
    /// Create a handle around an existing outbound sender
    pub fn new(id: ConnectionId, peer_addr: SocketAddr, tx: mpsc::UnboundedSender<Bytes>) -> Self {
        Self { id, peer_addr, tx }
    }

    /// Create a handle together with the receiving end of its queue
    pub fn channel(
        id: ConnectionId,
        peer_addr: SocketAddr,
    ) -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(id, peer_addr, tx), rx)
    }

    /// Connection id
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Remote peer address
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Queue a line for the connection. Never blocks.
    ///
    /// Fails once the writer side has gone away.
    pub fn send(&self, line: Bytes) -> Result<()> {
        self.tx
            .send(line)
            .map_err(|_| Error::ConnectionClosed(self.id))
    }

    /// Whether the writer side has gone away
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
