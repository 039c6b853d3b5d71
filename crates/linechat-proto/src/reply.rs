//! Server-originated reply text.
//!
//! Errors travel over the same channel as chat content; they are plain lines
//! with no distinguishing marker.

/// Broadcast announcing that a user came online.
pub const ONLINE: &str = "online success";

/// Broadcast announcing that a user went offline.
pub const OFFLINE: &str = "offline success";

/// Rename target already taken.
pub const NAME_OCCUPIED: &str = "The current user name is occupied";

/// Rename target empty or containing the field delimiter.
pub const INVALID_NAME: &str = "The user name is invalid";

/// Malformed `to|` line.
pub const FORMAT_ERROR: &str = "Message format error";

/// Private message target is not online.
pub const NO_SUCH_USER: &str = "The user does not exist";

/// Private message with an empty body.
pub const NO_CONTENT: &str = "No message content";

/// Public message line: `[addr]name: text`.
pub fn broadcast(addr: &str, name: &str, text: &str) -> String {
    format!("[{addr}]{name}: {text}")
}

/// One roster line returned by `who`.
pub fn roster_entry(addr: &str, name: &str) -> String {
    format!("[{addr}]{name}: online...")
}

/// Private message as seen by the recipient.
pub fn private(sender: &str, content: &str) -> String {
    format!("{sender} to you say: {content}")
}

/// Rename confirmation.
pub fn renamed(name: &str) -> String {
    format!("You have updated your user name to {name}")
}
