//! Chat command handlers.
//!
//! This module contains the Handler trait and the dispatcher that routes
//! each classified client line to its handler.
//!
//! Handlers are synchronous: every side effect is either a registry
//! operation under a short lock or a non-blocking enqueue, so nothing here
//! ever awaits.

mod dispatcher;
mod messaging;
mod user_query;
mod user_status;

pub use dispatcher::Dispatcher;
pub use messaging::{PrivateHandler, SayHandler};
pub use user_query::WhoHandler;
pub use user_status::RenameHandler;

use std::sync::Arc;

use linechat_proto::Command;

pub use crate::error::{HandlerError, HandlerResult};
use crate::state::{Lobby, Session};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The session that sent the line. Replies go here.
    pub session: &'a Arc<Session>,
    /// Shared server state.
    pub lobby: &'a Lobby,
}

/// Trait implemented by all command handlers.
pub trait Handler: Send + Sync {
    /// Handle one classified command.
    fn handle(&self, ctx: &Context<'_>, cmd: Command) -> HandlerResult;
}
