//! Cart change notification (mechanics only).
//!
//! A plain fan-out over channels: every subscriber gets a copy of every
//! published state. Dead subscribers are dropped on the next publish.

use std::sync::{Mutex, mpsc};
use std::time::Duration;

/// A live subscription to cart-state updates.
///
/// Designed for single-threaded consumption; drop it to unsubscribe.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: mpsc::Receiver<M>,
}

impl<M> Subscription<M> {
    pub(crate) fn new(receiver: mpsc::Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next update is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an update without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an update.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Best-effort fan-out registry.
///
/// - No IO / no async
/// - Publishing never fails; a poisoned lock silently skips notification
#[derive(Debug)]
pub(crate) struct SubscriberRegistry<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> Default for SubscriberRegistry<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> SubscriberRegistry<M>
where
    M: Clone,
{
    pub(crate) fn publish(&self, message: M) {
        if let Ok(mut subs) = self.subscribers.lock() {
            // Drop any dead subscribers while publishing.
            subs.retain(|tx| tx.send(message.clone()).is_ok());
        }
    }

    pub(crate) fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_each_message() {
        let registry = SubscriberRegistry::default();
        let a = registry.subscribe();
        let b = registry.subscribe();

        registry.publish(1u32);

        assert_eq!(a.recv().unwrap(), 1);
        assert_eq!(b.recv().unwrap(), 1);
    }

    #[test]
    fn dropped_subscribers_do_not_break_publishing() {
        let registry = SubscriberRegistry::default();
        let a = registry.subscribe();
        let b = registry.subscribe();
        drop(a);

        registry.publish(7u32);
        registry.publish(8u32);

        assert_eq!(b.recv().unwrap(), 7);
        assert_eq!(b.recv().unwrap(), 8);
    }
}
