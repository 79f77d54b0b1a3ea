//! One-shot observers keyed by the object that will emit
//!
//! A subscription is consumed by the first matching notification, so a
//! second notification from the same source finds nothing and is ignored.

use onslaught_core::{CombatError, ObjectId};
use std::collections::HashMap;

/// Subscription handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Registry of one-shot subscriptions
#[derive(Debug)]
pub struct Observers {
    subscriptions: HashMap<ObjectId, SubscriberId>,
    next_subscriber_id: u64,
}

impl Observers {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
            next_subscriber_id: 1,
        }
    }

    /// Subscribe once to `source`. Re-subscribing returns the existing handle.
    pub fn subscribe_once(&mut self, source: ObjectId) -> SubscriberId {
        if let Some(existing) = self.subscriptions.get(&source) {
            return *existing;
        }
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        self.subscriptions.insert(source, id);
        id
    }

    /// Consume the subscription for `source`
    ///
    /// Returns `RedundantTransition` if nothing was subscribed, which is
    /// what a repeated notification looks like.
    pub fn notify(&mut self, source: ObjectId, transition: &'static str) -> Result<SubscriberId, CombatError> {
        self.subscriptions
            .remove(&source)
            .ok_or(CombatError::RedundantTransition {
                object: source,
                transition,
            })
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// No live subscriptions
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Default for Observers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_consumes_subscription() {
        let mut observers = Observers::new();
        let source = ObjectId::from_raw(3);
        let sub = observers.subscribe_once(source);

        assert_eq!(observers.notify(source, "death"), Ok(sub));
        assert!(observers.is_empty());
    }

    #[test]
    fn test_second_notify_is_redundant() {
        let mut observers = Observers::new();
        let source = ObjectId::from_raw(3);
        observers.subscribe_once(source);
        observers.notify(source, "death").unwrap();

        let err = observers.notify(source, "death").unwrap_err();
        assert!(matches!(err, CombatError::RedundantTransition { .. }));
    }

    #[test]
    fn test_resubscribe_is_idempotent() {
        let mut observers = Observers::new();
        let source = ObjectId::from_raw(9);
        let a = observers.subscribe_once(source);
        let b = observers.subscribe_once(source);
        assert_eq!(a, b);
        assert_eq!(observers.len(), 1);
    }
}
