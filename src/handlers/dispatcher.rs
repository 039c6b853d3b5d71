//! Command dispatcher.
//!
//! Maps each command label to its handler and wraps every call with a
//! tracing span, a latency timer and usage counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use linechat_proto::{Command, ParseError};
use tracing::debug;

use super::{
    Context, Handler, HandlerError, HandlerResult, PrivateHandler, RenameHandler, SayHandler,
    WhoHandler,
};
use crate::telemetry::{CommandTimer, spans};

/// Registry of command handlers.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    command_counts: HashMap<&'static str, AtomicU64>,
}

impl Dispatcher {
    /// Create a dispatcher with every handler registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        handlers.insert("who", Box::new(WhoHandler));
        handlers.insert("rename", Box::new(RenameHandler));
        handlers.insert("to", Box::new(PrivateHandler));
        handlers.insert("say", Box::new(SayHandler));

        let command_counts = handlers
            .keys()
            .map(|&cmd| (cmd, AtomicU64::new(0)))
            .collect();

        Self {
            handlers,
            command_counts,
        }
    }

    /// Command usage counts, most used first. Unused commands are omitted.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch a classified command to its handler.
    pub fn dispatch(&self, ctx: &Context<'_>, cmd: Command) -> HandlerResult {
        let name = cmd.name();
        let Some(handler) = self.handlers.get(name) else {
            debug!(command = name, "No handler registered");
            return Ok(());
        };

        if let Some(counter) = self.command_counts.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let _timer = CommandTimer::new(name);
        handler.handle(ctx, cmd)
    }

    /// Classify and handle one inbound line.
    ///
    /// Any error is reported to the requesting session only; the
    /// connection keeps going.
    pub fn dispatch_line(&self, ctx: &Context<'_>, line: &str) {
        let (label, result) = match Command::parse(line) {
            Ok(cmd) => {
                let label = cmd.name();
                let _span = spans::command(label, ctx.session.addr()).entered();
                (label, self.dispatch(ctx, cmd))
            }
            Err(e) => (parse_error_label(&e), Err(HandlerError::from(e))),
        };

        if let Err(e) = result {
            crate::metrics::record_command_error(label, e.error_code());
            debug!(command = label, error = %e, "Command error");
            if let Some(text) = e.reply_text() {
                ctx.session.send(text);
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Command a rejected line was aimed at.
fn parse_error_label(err: &ParseError) -> &'static str {
    match err {
        ParseError::Format => "to",
        ParseError::InvalidName(_) => "rename",
    }
}
