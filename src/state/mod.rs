//! State management module.
//!
//! Contains the Lobby (shared server state) and the entities it owns:
//! sessions, the name registry, and the broadcast hub.

mod hub;
mod id;
mod lobby;
mod registry;
mod session;

pub use hub::BroadcastHub;
pub use id::{SessionId, SessionIdGenerator};
pub use lobby::Lobby;
pub use registry::Registry;
pub use session::{Session, SessionState};
