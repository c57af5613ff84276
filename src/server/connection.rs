//! Per-connection handler
//!
//! Each accepted stream is split in two. A writer task drains the
//! connection's outbound queue onto the socket; the reader loop frames
//! incoming lines and dispatches them to the registry. When the reader
//! stops (EOF or error) the connection's subscriptions are dropped.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::protocol::{response, Command, LineBuffer};
use crate::registry::{ConnectionHandle, ConnectionId, SubscriptionRegistry};
use crate::server::config::ServerConfig;

/// A single client connection
pub struct Connection<S> {
    id: ConnectionId,
    stream: S,
    peer_addr: SocketAddr,
    config: ServerConfig,
    registry: Arc<SubscriptionRegistry>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Create a handler for an accepted stream
    pub fn new(
        id: ConnectionId,
        stream: S,
        peer_addr: SocketAddr,
        config: ServerConfig,
        registry: Arc<SubscriptionRegistry>,
    ) -> Self {
        Self {
            id,
            stream,
            peer_addr,
            config,
            registry,
        }
    }

    /// Run until the peer disconnects
    ///
    /// Subscriptions are removed on every exit path. The returned error, if
    /// any, is the read error that ended the connection.
    pub async fn run(self) -> Result<()> {
        let (mut reader, writer) = tokio::io::split(self.stream);
        let (handle, outbound) = ConnectionHandle::channel(self.id, self.peer_addr);

        let mut writer_task = tokio::spawn(write_loop(self.id, writer, outbound));

        if handle.send(response::welcome(&self.peer_addr)).is_err() {
            tracing::debug!(connection_id = %self.id, "Peer gone before welcome");
        }

        let result = read_loop(&mut reader, &handle, &self.config, &self.registry).await;

        self.registry.unsubscribe_all(self.id).await;

        // Last sender; the writer flushes what is queued and exits
        drop(handle);
        match tokio::time::timeout(self.config.drain_timeout, &mut writer_task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::error!(connection_id = %self.id, error = %e, "Writer task failed");
            }
            Err(_) => {
                // Peer stopped reading; don't let a stuck write pin the connection
                tracing::debug!(connection_id = %self.id, "Final flush timed out");
                writer_task.abort();
            }
        }

        result
    }
}

async fn read_loop<R>(
    reader: &mut R,
    handle: &ConnectionHandle,
    config: &ServerConfig,
    registry: &SubscriptionRegistry,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = LineBuffer::with_max_line_length(config.max_line_length);
    let mut buf = vec![0u8; config.read_buffer_size.max(1)];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        for line in lines.push(&buf[..n]) {
            dispatch(registry, handle, &line).await;
        }
    }

    // Peer closed mid-line; treat the tail as a final line
    if let Some(rest) = lines.finish() {
        dispatch(registry, handle, &rest).await;
    }

    Ok(())
}

/// Apply one line from `handle`'s connection to the registry
pub async fn dispatch(registry: &SubscriptionRegistry, handle: &ConnectionHandle, line: &str) {
    match Command::parse(line) {
        Command::Subscribe(event) => registry.subscribe(handle, event).await,
        Command::Unsubscribe(event) => {
            registry.unsubscribe(handle, event).await;
        }
        Command::Alert(event) => {
            registry.broadcast(event).await;
        }
        Command::Unknown(line) => {
            tracing::warn!(connection_id = %handle.id(), line = line, "Unknown command");
        }
    }
}

async fn write_loop<W>(id: ConnectionId, mut writer: W, mut outbound: mpsc::UnboundedReceiver<Bytes>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = outbound.recv().await {
        if let Err(e) = writer.write_all(&line).await {
            // Closing the queue makes later sends fail fast
            tracing::debug!(connection_id = %id, error = %e, "Write failed");
            return;
        }
    }

    if let Err(e) = writer.shutdown().await {
        tracing::debug!(connection_id = %id, error = %e, "Shutdown failed");
    }
}
