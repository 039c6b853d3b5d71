//! # linechat-proto
//!
//! The wire protocol spoken between `linechatd` and its clients.
//!
//! Every message is one UTF-8 line terminated by `\n`. Client lines are
//! classified by a short literal prefix:
//!
//! | Line | Meaning |
//! |---|---|
//! | `who` | list online users |
//! | `rename\|<name>` | change display name |
//! | `to\|<name>\|<content>` | private message |
//! | anything else | public broadcast |
//!
//! ## Quick Start
//!
//! ```rust
//! use linechat_proto::{Command, reply};
//!
//! let cmd = Command::parse("to|bob|hello").expect("valid private message");
//! assert_eq!(cmd.name(), "to");
//! assert_eq!(cmd.to_line(), "to|bob|hello");
//!
//! assert_eq!(reply::private("alice", "hello"), "alice to you say: hello");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod reply;

pub use self::command::Command;
pub use self::error::{ParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
