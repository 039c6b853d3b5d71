//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task and owns one socket:
//!
//! ```text
//!   socket read half                              socket write half
//!         │                                               ▲
//!   FramedRead<LineCodec>                      FramedWrite<LineCodec>
//!         │                                               │
//!         ▼                                               │
//!   [Dispatcher] ──► registry / hub / sessions ──► delivery queue
//!   (reader loop, this task)                      (writer task)
//! ```
//!
//! Everything that wants to talk to this client goes through the session's
//! delivery queue. Only the writer task touches the write half.

use crate::config::LimitsConfig;
use crate::handlers::{Context, Dispatcher};
use crate::state::{Lobby, Session};
use crate::telemetry::spans;
use futures_util::{SinkExt, StreamExt};
use linechat_proto::LineCodec;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug, info, warn};

/// A client connection handler.
pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    lobby: Arc<Lobby>,
    dispatcher: Arc<Dispatcher>,
    max_line_length: usize,
}

impl Connection {
    /// Create a new connection handler.
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        lobby: Arc<Lobby>,
        dispatcher: Arc<Dispatcher>,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            stream,
            addr,
            lobby,
            dispatcher,
            max_line_length: limits.max_line_length,
        }
    }

    /// Run the connection until the peer goes away.
    pub async fn run(self) -> anyhow::Result<()> {
        let (session, queue) = Session::new(self.lobby.next_session_id(), self.addr.to_string());
        let span = spans::connection(session.id(), session.addr());
        self.serve(session, queue).instrument(span).await
    }

    async fn serve(
        self,
        session: Arc<Session>,
        queue: mpsc::UnboundedReceiver<String>,
    ) -> anyhow::Result<()> {
        info!(server = %self.lobby.server_name(), "Client connected");

        let (read_half, write_half) = self.stream.into_split();
        let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(self.max_line_length));
        let writer = FramedWrite::new(write_half, LineCodec::new());

        let shutdown = CancellationToken::new();
        let writer_task = tokio::spawn(
            write_loop(writer, queue, shutdown.clone()).instrument(Span::current()),
        );

        session.online(&self.lobby)?;

        loop {
            match reader.next().await {
                Some(Ok(line)) => {
                    debug!(line = %line, "Received line");
                    let ctx = Context {
                        session: &session,
                        lobby: &self.lobby,
                    };
                    self.dispatcher.dispatch_line(&ctx, &line);
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Read error");
                    break;
                }
                None => {
                    info!("Client disconnected");
                    break;
                }
            }
        }

        session.offline(&self.lobby)?;
        debug!(commands = ?self.dispatcher.command_stats(), "Command usage");

        shutdown.cancel();
        if let Err(e) = writer_task.await {
            warn!(error = %e, "Writer task failed");
        }

        Ok(())
    }
}

/// Drain the delivery queue onto the socket.
///
/// Exits on the first write error, leaving the session registered: only
/// the reader side takes a session offline. On shutdown, lines already
/// queued are flushed first.
async fn write_loop<W: AsyncWrite + Unpin>(
    mut writer: FramedWrite<W, LineCodec>,
    mut queue: mpsc::UnboundedReceiver<String>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            line = queue.recv() => {
                let Some(line) = line else { break };
                if let Err(e) = writer.send(line).await {
                    warn!(error = %e, "Write error");
                    return;
                }
            }
            _ = shutdown.cancelled() => {
                while let Ok(line) = queue.try_recv() {
                    if writer.send(line).await.is_err() {
                        return;
                    }
                }
                break;
            }
        }
    }
    debug!("Writer stopped");
}
