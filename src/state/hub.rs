//! BroadcastHub - the single serialization point for public messages.
//!
//! Producers submit pre-formatted lines; one consumer task takes them in
//! order and fans each out to every online session. Because there is only
//! one consumer, broadcast order is the same for every recipient.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Registry;

/// Handle for submitting broadcast lines.
#[derive(Clone)]
pub struct BroadcastHub {
    tx: mpsc::UnboundedSender<String>,
}

impl BroadcastHub {
    /// Start the consumer task.
    ///
    /// The task exits once every handle has been dropped and the queue
    /// is drained.
    pub fn spawn(registry: Arc<Registry>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let handle = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                let recipients = registry.fan_out(&line);
                crate::metrics::record_broadcast(recipients);
                debug!(recipients, "Broadcast delivered");
            }
            debug!("Broadcast hub stopped");
        });

        (Self { tx }, handle)
    }

    /// Queue one line for every online session. Never blocks.
    pub fn submit(&self, line: String) {
        if self.tx.send(line).is_err() {
            warn!("Broadcast hub stopped, dropping line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Session, SessionIdGenerator};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_broadcasts_arrive_in_submission_order() {
        let ids = SessionIdGenerator::new();
        let registry = Arc::new(Registry::new());
        let (a, mut rx_a) = Session::new(ids.next(), "a");
        let (b, mut rx_b) = Session::new(ids.next(), "b");
        registry.register(a.name(), a);
        registry.register(b.name(), b);

        let (hub, _handle) = BroadcastHub::spawn(Arc::clone(&registry));
        for i in 0..100 {
            hub.submit(format!("msg {i}"));
        }

        for rx in [&mut rx_a, &mut rx_b] {
            for i in 0..100 {
                let line = timeout(Duration::from_secs(1), rx.recv())
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(line, format!("msg {i}"));
            }
        }
    }

    #[tokio::test]
    async fn test_consumer_stops_when_handles_dropped() {
        let registry = Arc::new(Registry::new());
        let (hub, handle) = BroadcastHub::spawn(registry);
        hub.submit("to nobody".into());
        drop(hub);

        timeout(Duration::from_secs(1), handle)
            .await
            .expect("hub task did not stop")
            .unwrap();
    }
}
