//! User status handler: `rename|<name>`

use linechat_proto::{Command, reply};
use tracing::info;

use super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for `rename|<name>`.
///
/// The availability check and the swap are one registry operation, so
/// two users racing for the same name cannot both win.
pub struct RenameHandler;

impl Handler for RenameHandler {
    fn handle(&self, ctx: &Context<'_>, cmd: Command) -> HandlerResult {
        let Command::Rename { name } = cmd else {
            return Err(HandlerError::Misrouted {
                handler: "rename",
                command: cmd.name(),
            });
        };

        let old = ctx.session.name();
        ctx.lobby.registry().rename(ctx.session, &name)?;
        info!(id = %ctx.session.id(), old = %old, new = %name, "User renamed");

        ctx.session.send(reply::renamed(&name));
        Ok(())
    }
}
