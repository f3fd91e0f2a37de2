//! Process-wide auth event fan-out
//!
//! One `AuthEventBus` lives inside the auth provider. Each subscriber holds
//! an `AuthSubscription`; dropping it releases the listener slot.

use congregate_domain::AuthEvent;
use tokio::sync::broadcast;
use tracing::{debug, warn};

const DEFAULT_CAPACITY: usize = 16;

/// Broadcast channel for auth state changes
#[derive(Debug, Clone)]
pub struct AuthEventBus {
    sender: broadcast::Sender<AuthEvent>,
}

impl Default for AuthEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl AuthEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to every live subscriber. Returns how many received it.
    pub fn publish(&self, event: AuthEvent) -> usize {
        let kind = event.kind;
        match self.sender.send(event) {
            Ok(count) => {
                debug!(?kind, listeners = count, "auth event published");
                count
            }
            Err(_) => {
                debug!(?kind, "auth event dropped, no listeners");
                0
            }
        }
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription { receiver: self.sender.subscribe() }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Live subscription to auth events
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    /// Next event, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "auth subscriber lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
