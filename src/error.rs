//! Unified error handling for linechat.
//!
//! This module provides the server-side error hierarchy, with automatic
//! conversions from protocol parse errors, reply-line generation, and
//! metric labeling.

use linechat_proto::{ParseError, reply};
use thiserror::Error;

use crate::state::SessionState;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
///
/// Protocol errors are never fatal: the dispatcher renders them as a reply
/// line to the requesting session and keeps reading.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("name in use: {0}")]
    NameOccupied(String),

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("malformed private message")]
    Format,

    #[error("no such user: {0}")]
    NoSuchUser(String),

    #[error("no message content")]
    NoContent,

    /// The requester is not registered (already offline).
    #[error("session is not online")]
    NotOnline,

    /// A handler was given a command it does not serve.
    #[error("{handler} handler cannot process {command}")]
    Misrouted {
        handler: &'static str,
        command: &'static str,
    },
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NameOccupied(_) => "name_occupied",
            Self::InvalidName(_) => "invalid_name",
            Self::Format => "format_error",
            Self::NoSuchUser(_) => "no_such_user",
            Self::NoContent => "no_content",
            Self::NotOnline => "not_online",
            Self::Misrouted { .. } => "misrouted",
        }
    }

    /// Text of the reply line sent back to the requester.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn reply_text(&self) -> Option<&'static str> {
        match self {
            Self::NameOccupied(_) => Some(reply::NAME_OCCUPIED),
            Self::InvalidName(_) => Some(reply::INVALID_NAME),
            Self::Format => Some(reply::FORMAT_ERROR),
            Self::NoSuchUser(_) => Some(reply::NO_SUCH_USER),
            Self::NoContent => Some(reply::NO_CONTENT),

            // These errors don't get client-visible replies
            Self::NotOnline => None,
            Self::Misrouted { .. } => None,
        }
    }
}

impl From<ParseError> for HandlerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Format => Self::Format,
            ParseError::InvalidName(name) => Self::InvalidName(name),
        }
    }
}

impl From<RenameError> for HandlerError {
    fn from(err: RenameError) -> Self {
        match err {
            RenameError::Occupied(name) => Self::NameOccupied(name),
            RenameError::NotRegistered => Self::NotOnline,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// State Errors (session lifecycle and registry)
// ============================================================================

/// Session lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid session transition: {from} -> {to}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

/// Registry rename failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("name {0} is already registered")]
    Occupied(String),

    /// The session's current name does not map to it.
    #[error("session is not registered")]
    NotRegistered,
}
