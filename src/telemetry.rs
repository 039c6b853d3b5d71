//! Telemetry utilities for command timing and tracing spans.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    use crate::state::SessionId;

    /// Create a span for a client connection.
    pub fn connection(id: SessionId, addr: &str) -> Span {
        info_span!("connection", id = %id, addr = %addr)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, source: &str) -> Span {
        debug_span!("chat.command", name = %name, source = %source)
    }
}
