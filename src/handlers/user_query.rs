//! User query handler: `who`

use linechat_proto::{Command, reply};

use super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for `who`.
///
/// Sends one roster line per online user back to the requester only.
pub struct WhoHandler;

impl Handler for WhoHandler {
    fn handle(&self, ctx: &Context<'_>, cmd: Command) -> HandlerResult {
        if cmd != Command::Who {
            return Err(HandlerError::Misrouted {
                handler: "who",
                command: cmd.name(),
            });
        }

        for user in ctx.lobby.registry().snapshot() {
            ctx.session
                .send(reply::roster_entry(user.addr(), &user.name()));
        }
        Ok(())
    }
}
