// src/backend/events.rs
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use crate::backend::AuthSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

#[derive(Debug, Clone)]
pub struct AuthStateChange {
    pub event: AuthChangeEvent,
    pub user_id: String,
    /// Present for `SignedIn` and `TokenRefreshed`.
    pub session: Option<AuthSession>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(u64, Sender<AuthStateChange>)>,
}

/// Process-wide broadcaster for auth state changes.
///
/// Cloning shares the subscriber list.
#[derive(Clone, Default)]
pub struct AuthEvents {
    registry: Arc<Mutex<Registry>>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let mut reg = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = reg.next_id;
        reg.next_id += 1;
        reg.subscribers.push((id, tx));

        Subscription {
            id,
            rx,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver to every live subscriber; returns how many received it.
    pub fn emit(&self, change: AuthStateChange) -> usize {
        let mut reg = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        reg.subscribers
            .retain(|(_, tx)| tx.send(change.clone()).is_ok());
        reg.subscribers.len()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .len()
    }
}

/// Receiving end of [`AuthEvents::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    rx: Receiver<AuthStateChange>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    #[cfg(test)]
    pub fn try_recv(&self) -> Option<AuthStateChange> {
        self.rx.try_recv().ok()
    }

    /// Blocks for the next change; `None` once the broadcaster is gone.
    pub fn recv(&self) -> Option<AuthStateChange> {
        self.rx.recv().ok()
    }

    /// `Ok(None)` on timeout, `Err(())` once the broadcaster is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<AuthStateChange>, ()> {
        match self.rx.recv_timeout(timeout) {
            Ok(change) => Ok(Some(change)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(()),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}
