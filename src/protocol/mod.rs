//! Text protocol
//!
//! Clients and server exchange `\r\n`-terminated text lines. See
//! [`command`] for what clients may send and [`response`] for what the
//! server writes back.

pub mod command;
pub mod lines;
pub mod response;

pub use command::Command;
pub use lines::LineBuffer;

/// Line delimiter in both directions
pub const LINE_DELIMITER: &str = "\r\n";
