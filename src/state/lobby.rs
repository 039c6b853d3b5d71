//! Lobby - the shared server state.
//!
//! Constructed once at startup and handed to every connection as
//! `Arc<Lobby>`. Nothing in the server reaches shared state any other way.

use std::sync::Arc;

use linechat_proto::reply;
use tokio::task::JoinHandle;

use super::{BroadcastHub, Registry, Session, SessionId, SessionIdGenerator};

/// Shared server state.
pub struct Lobby {
    server_name: String,
    registry: Arc<Registry>,
    hub: BroadcastHub,
    ids: SessionIdGenerator,
}

impl Lobby {
    /// Build the lobby and start its broadcast hub.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(server_name: impl Into<String>) -> (Self, JoinHandle<()>) {
        let registry = Arc::new(Registry::new());
        let (hub, handle) = BroadcastHub::spawn(Arc::clone(&registry));
        let lobby = Self {
            server_name: server_name.into(),
            registry,
            hub,
            ids: SessionIdGenerator::new(),
        };
        (lobby, handle)
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[cfg(test)]
    pub fn hub(&self) -> &BroadcastHub {
        &self.hub
    }

    pub fn next_session_id(&self) -> SessionId {
        self.ids.next()
    }

    /// Submit `text` as a public message from `from`.
    pub fn broadcast(&self, from: &Session, text: &str) {
        self.hub
            .submit(reply::broadcast(from.addr(), &from.name(), text));
    }
}
