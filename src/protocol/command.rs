//! Client command parsing
//!
//! One command per line, matched on case-sensitive literal prefixes:
//!
//! ```text
//! subscribe: <name>
//! unsubscribe: <name>
//! alertNoParam: <name>
//! ```

/// Prefix for the subscribe command
pub const SUBSCRIBE_PREFIX: &str = "subscribe: ";
/// Prefix for the unsubscribe command
pub const UNSUBSCRIBE_PREFIX: &str = "unsubscribe: ";
/// Prefix for the broadcast trigger command
pub const ALERT_PREFIX: &str = "alertNoParam: ";

/// A parsed client command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Subscribe the sender to an event name
    Subscribe(&'a str),
    /// Remove every subscription of the sender matching an event name
    Unsubscribe(&'a str),
    /// Notify every subscriber of an event name
    Alert(&'a str),
    /// Anything else
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parse a single line (without delimiter).
    ///
    /// The event name is everything after the prefix, taken verbatim.
    /// A recognised prefix with nothing after it parses as `Unknown`, since
    /// event names are never empty.
    pub fn parse(line: &'a str) -> Self {
        let parsed = if let Some(name) = line.strip_prefix(SUBSCRIBE_PREFIX) {
            Command::Subscribe(name)
        } else if let Some(name) = line.strip_prefix(UNSUBSCRIBE_PREFIX) {
            Command::Unsubscribe(name)
        } else if let Some(name) = line.strip_prefix(ALERT_PREFIX) {
            Command::Alert(name)
        } else {
            return Command::Unknown(line);
        };

        match parsed.event_name() {
            Some("") => Command::Unknown(line),
            _ => parsed,
        }
    }

    /// Event name carried by the command, if any
    pub fn event_name(&self) -> Option<&'a str> {
        match *self {
            Command::Subscribe(name) | Command::Unsubscribe(name) | Command::Alert(name) => {
                Some(name)
            }
            Command::Unknown(_) => None,
        }
    }
}
