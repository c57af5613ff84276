//! Server to client lines
//!
//! Every line carries its own `\r\n` terminator.

use std::net::SocketAddr;

use bytes::Bytes;

use super::LINE_DELIMITER;

/// Greeting sent on connect: `Welcome!` followed by the peer's `ip:port`
pub fn welcome(peer_addr: &SocketAddr) -> Bytes {
    Bytes::from(format!(
        "Welcome!{d}{}:{}{d}",
        peer_addr.ip(),
        peer_addr.port(),
        d = LINE_DELIMITER
    ))
}

/// Sent after a subscription is recorded
pub fn subscribed(event: &str) -> Bytes {
    Bytes::from(format!("Subscription to {} confirmed{}", event, LINE_DELIMITER))
}

/// Sent once per removed subscription
pub fn unsubscribed(event: &str) -> Bytes {
    Bytes::from(format!("Unsubscribed from {}{}", event, LINE_DELIMITER))
}

/// Delivered to each matching subscription on broadcast
pub fn alert(event: &str) -> Bytes {
    Bytes::from(format!("alert: {}{}", event, LINE_DELIMITER))
}
