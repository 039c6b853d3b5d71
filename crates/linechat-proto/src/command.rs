//! Client command classification.
//!
//! Commands are recognised by a short literal prefix checked before the
//! generic broadcast fallback, so classifying a line never backtracks.

use std::fmt;

use crate::error::ParseError;

/// Field delimiter used by `rename|` and `to|`.
pub const DELIMITER: char = '|';

const WHO: &str = "who";
const RENAME_PREFIX: &str = "rename|";
const PRIVATE_PREFIX: &str = "to|";

/// A classified client line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `who`: list every online user back to the requester.
    Who,
    /// `rename|<name>`: change the requester's display name.
    Rename {
        /// Requested display name.
        name: String,
    },
    /// `to|<target>|<content>`: deliver `content` to a single user.
    Private {
        /// Display name of the recipient.
        target: String,
        /// Message body. May be empty; the server rejects that after the
        /// recipient lookup.
        content: String,
    },
    /// Any other line: public message to everyone online.
    Say {
        /// The line as typed.
        text: String,
    },
}

impl Command {
    /// Classify one inbound line (already stripped of its line terminator).
    ///
    /// The content field of `to|` keeps any further `|` characters, so
    /// `to|bob|a|b` delivers `a|b`.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        if line == WHO {
            return Ok(Command::Who);
        }

        if let Some(name) = line.strip_prefix(RENAME_PREFIX) {
            if name.is_empty() || name.contains(DELIMITER) {
                return Err(ParseError::InvalidName(name.to_owned()));
            }
            return Ok(Command::Rename {
                name: name.to_owned(),
            });
        }

        if let Some(rest) = line.strip_prefix(PRIVATE_PREFIX) {
            let mut fields = rest.splitn(2, DELIMITER);
            let target = fields.next().unwrap_or_default();
            let Some(content) = fields.next() else {
                return Err(ParseError::Format);
            };
            if target.is_empty() {
                return Err(ParseError::Format);
            }
            return Ok(Command::Private {
                target: target.to_owned(),
                content: content.to_owned(),
            });
        }

        Ok(Command::Say {
            text: line.to_owned(),
        })
    }

    /// Static command label, used as the dispatch key and metrics label.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Who => "who",
            Command::Rename { .. } => "rename",
            Command::Private { .. } => "to",
            Command::Say { .. } => "say",
        }
    }

    /// Render the command in wire form, without the trailing newline.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Who => f.write_str(WHO),
            Command::Rename { name } => write!(f, "{RENAME_PREFIX}{name}"),
            Command::Private { target, content } => {
                write!(f, "{PRIVATE_PREFIX}{target}{DELIMITER}{content}")
            }
            Command::Say { text } => f.write_str(text),
        }
    }
}

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}
