//! Messaging handlers: `to|<name>|<content>` and public messages.

use linechat_proto::{Command, reply};
use tracing::debug;

use super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for `to|<name>|<content>`.
///
/// Checks run in a fixed order: target lookup first, then content. The
/// message is enqueued to the target only.
pub struct PrivateHandler;

impl Handler for PrivateHandler {
    fn handle(&self, ctx: &Context<'_>, cmd: Command) -> HandlerResult {
        let Command::Private { target, content } = cmd else {
            return Err(HandlerError::Misrouted {
                handler: "to",
                command: cmd.name(),
            });
        };

        let recipient = ctx
            .lobby
            .registry()
            .lookup(&target)
            .ok_or_else(|| HandlerError::NoSuchUser(target.clone()))?;

        if content.is_empty() {
            return Err(HandlerError::NoContent);
        }

        debug!(from = %ctx.session.id(), to = %recipient.id(), "Private message");
        recipient.send(reply::private(&ctx.session.name(), &content));
        Ok(())
    }
}

/// Handler for any other line: public message to everyone online,
/// sender included.
pub struct SayHandler;

impl Handler for SayHandler {
    fn handle(&self, ctx: &Context<'_>, cmd: Command) -> HandlerResult {
        let Command::Say { text } = cmd else {
            return Err(HandlerError::Misrouted {
                handler: "say",
                command: cmd.name(),
            });
        };

        ctx.lobby.broadcast(ctx.session, &text);
        Ok(())
    }
}
