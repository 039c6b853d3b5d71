//! Per-connection session state.
//!
//! A session is the server-side identity of one connected participant: a
//! display name, the remote address it connected from, and the sending half
//! of its delivery queue. The connection task owns the receiving half and is
//! the only code that writes to the socket.
//!
//! ## Lifecycle
//!
//! ```text
//! ┌─────────┐  online()  ┌────────┐  offline()  ┌─────────┐
//! │ Created ├───────────►│ Online ├────────────►│ Offline │
//! └─────────┘            └────────┘             └─────────┘
//! ```
//!
//! A session is single-use: `Offline` is terminal.

use std::fmt;
use std::sync::Arc;

use linechat_proto::reply;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{Lobby, SessionId};
use crate::error::SessionError;

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepted, not yet visible in the registry.
    Created,
    /// Registered under its display name.
    Online,
    /// Removed from the registry; terminal.
    Offline,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}

/// One connected participant.
pub struct Session {
    id: SessionId,
    addr: String,
    /// Display name. Only [`Registry::rename`](super::Registry::rename)
    /// writes it, while holding the registry write lock.
    pub(super) name: RwLock<String>,
    state: Mutex<SessionState>,
    tx: mpsc::UnboundedSender<String>,
}

impl Session {
    /// Create a session named after its address, returning the receiving
    /// half of its delivery queue.
    pub fn new(
        id: SessionId,
        addr: impl Into<String>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let addr = addr.into();
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Arc::new(Self {
            id,
            name: RwLock::new(addr.clone()),
            addr,
            state: Mutex::new(SessionState::Created),
            tx,
        });
        (session, rx)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Remote address, fixed at accept time.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Current display name.
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Enqueue one line for this session's writer.
    ///
    /// Never blocks. Lines sent after the writer has gone are dropped.
    pub fn send(&self, line: impl Into<String>) {
        if self.tx.send(line.into()).is_err() {
            debug!(id = %self.id, "Delivery queue closed, dropping line");
        }
    }

    /// Register under the current display name and announce arrival.
    pub fn online(self: &Arc<Self>, lobby: &Lobby) -> Result<(), SessionError> {
        self.transition(SessionState::Created, SessionState::Online)?;

        let name = self.name();
        lobby.registry().register(name.clone(), Arc::clone(self));
        crate::metrics::inc_connected_users();
        info!(id = %self.id, name = %name, online = lobby.registry().len(), "Session online");

        lobby.broadcast(self, reply::ONLINE);
        Ok(())
    }

    /// Leave the registry and announce departure.
    pub fn offline(&self, lobby: &Lobby) -> Result<(), SessionError> {
        self.transition(SessionState::Online, SessionState::Offline)?;

        let name = self.name();
        lobby.registry().unregister_if(&name, self.id);
        crate::metrics::dec_connected_users();
        info!(id = %self.id, name = %name, online = lobby.registry().len(), "Session offline");

        lobby.broadcast(self, reply::OFFLINE);
        Ok(())
    }

    fn transition(&self, from: SessionState, to: SessionState) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        if *state != from {
            return Err(SessionError::InvalidTransition { from: *state, to });
        }
        *state = to;
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("addr", &self.addr)
            .field("name", &*self.name.read())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionIdGenerator;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn recv(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for delivery")
            .expect("queue closed")
    }

    #[test]
    fn test_new_session_named_after_address() {
        let ids = SessionIdGenerator::new();
        let (session, _rx) = Session::new(ids.next(), "127.0.0.1:5000");

        assert_eq!(session.name(), "127.0.0.1:5000");
        assert_eq!(session.addr(), "127.0.0.1:5000");
        assert_eq!(session.state(), SessionState::Created);
    }

    #[test]
    fn test_send_preserves_order() {
        let ids = SessionIdGenerator::new();
        let (session, mut rx) = Session::new(ids.next(), "a");

        session.send("one");
        session.send("two");
        session.send(String::from("three"));

        assert_eq!(rx.try_recv().unwrap(), "one");
        assert_eq!(rx.try_recv().unwrap(), "two");
        assert_eq!(rx.try_recv().unwrap(), "three");
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let ids = SessionIdGenerator::new();
        let (session, rx) = Session::new(ids.next(), "a");
        drop(rx);
        session.send("nobody listening");
    }

    #[tokio::test]
    async fn test_online_registers_and_announces() {
        let (lobby, _hub) = Lobby::new("test");
        let (session, mut rx) = Session::new(lobby.next_session_id(), "127.0.0.1:5000");

        session.online(&lobby).unwrap();

        assert_eq!(session.state(), SessionState::Online);
        let found = lobby.registry().lookup("127.0.0.1:5000").unwrap();
        assert_eq!(found.id(), session.id());
        assert_eq!(
            recv(&mut rx).await,
            "[127.0.0.1:5000]127.0.0.1:5000: online success"
        );
    }

    #[tokio::test]
    async fn test_offline_unregisters_and_announces_to_others() {
        let (lobby, _hub) = Lobby::new("test");
        let (alice, _alice_rx) = Session::new(lobby.next_session_id(), "10.0.0.1:1");
        let (bob, mut bob_rx) = Session::new(lobby.next_session_id(), "10.0.0.2:2");

        bob.online(&lobby).unwrap();
        assert_eq!(recv(&mut bob_rx).await, "[10.0.0.2:2]10.0.0.2:2: online success");
        alice.online(&lobby).unwrap();
        assert_eq!(recv(&mut bob_rx).await, "[10.0.0.1:1]10.0.0.1:1: online success");

        alice.offline(&lobby).unwrap();

        assert_eq!(alice.state(), SessionState::Offline);
        assert!(lobby.registry().lookup("10.0.0.1:1").is_none());
        assert_eq!(recv(&mut bob_rx).await, "[10.0.0.1:1]10.0.0.1:1: offline success");
    }

    #[tokio::test]
    async fn test_invalid_transitions_are_rejected() {
        let (lobby, _hub) = Lobby::new("test");
        let (session, _rx) = Session::new(lobby.next_session_id(), "a");

        assert_eq!(
            session.offline(&lobby),
            Err(SessionError::InvalidTransition {
                from: SessionState::Created,
                to: SessionState::Offline,
            })
        );

        session.online(&lobby).unwrap();
        assert!(session.online(&lobby).is_err());

        session.offline(&lobby).unwrap();
        assert_eq!(
            session.online(&lobby),
            Err(SessionError::InvalidTransition {
                from: SessionState::Offline,
                to: SessionState::Online,
            })
        );
        assert!(session.offline(&lobby).is_err());
        assert_eq!(lobby.registry().len(), 0);
    }
}
