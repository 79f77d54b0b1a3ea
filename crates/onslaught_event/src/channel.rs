//! Channel for single-type events

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Sending half handed to event producers
#[derive(Debug)]
pub struct EventSender<E> {
    sender: Sender<E>,
}

impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> EventSender<E> {
    /// Send an event. Returns false if the channel was dropped.
    pub fn send(&self, event: E) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Channel owned by the event consumer
#[derive(Debug)]
pub struct EventChannel<E> {
    sender: Sender<E>,
    receiver: Receiver<E>,
}

impl<E> EventChannel<E> {
    /// Create a new channel
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Get a sender for producers
    pub fn sender(&self) -> EventSender<E> {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Drain all pending events in send order
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get pending count
    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}
