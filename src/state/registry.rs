//! Registry - the map from display name to online session.
//!
//! All reads and writes go through one `RwLock`, held for the whole
//! traversal, so no caller ever observes a half-applied rename. The lock
//! is synchronous and must never be held across an `.await`.
//!
//! Lock order: registry map, then a session's name.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{Session, SessionId};
use crate::error::RenameError;

/// Online sessions keyed by display name.
#[derive(Default)]
pub struct Registry {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `session` under `name`, replacing any previous entry.
    pub fn register(&self, name: String, session: Arc<Session>) {
        if let Some(previous) = self.sessions.write().insert(name, session) {
            debug!(replaced = %previous.id(), "Registry entry overwritten");
        }
    }

    /// Remove `name` if present, whoever holds it.
    #[allow(dead_code)] // Sessions leave through unregister_if
    pub fn unregister(&self, name: &str) -> Option<Arc<Session>> {
        self.sessions.write().remove(name)
    }

    /// Remove `name` only if it still maps to session `id`.
    pub fn unregister_if(&self, name: &str, id: SessionId) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get(name) {
            Some(session) if session.id() == id => {
                sessions.remove(name);
                true
            }
            _ => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(name).cloned()
    }

    /// Point-in-time copy of every online session.
    pub fn snapshot(&self) -> Vec<Arc<Session>> {
        self.sessions.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Move `session` to `new_name`.
    ///
    /// The availability check, the key swap and the session's own name
    /// update happen under one write-lock acquisition: of two concurrent
    /// renames to the same name exactly one succeeds.
    pub fn rename(&self, session: &Arc<Session>, new_name: &str) -> Result<(), RenameError> {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(new_name) {
            return Err(RenameError::Occupied(new_name.to_owned()));
        }

        let mut name = session.name.write();
        match sessions.get(name.as_str()) {
            Some(current) if current.id() == session.id() => {}
            _ => return Err(RenameError::NotRegistered),
        }

        sessions.remove(name.as_str());
        sessions.insert(new_name.to_owned(), Arc::clone(session));
        *name = new_name.to_owned();
        Ok(())
    }

    /// Enqueue `line` to every online session, returning the recipient count.
    pub fn fan_out(&self, line: &str) -> usize {
        let sessions = self.sessions.read();
        for session in sessions.values() {
            session.send(line);
        }
        sessions.len()
    }
}
