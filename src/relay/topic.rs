use std::collections::HashSet;

use crate::connection::ConnectionId;

/// A single trip topic and its set of subscribers.
///
/// Topics exist implicitly: the relay creates one on first join and drops
/// it again once its member set becomes empty, so empty entries never
/// accumulate under subscribe/unsubscribe churn.
#[derive(Debug, Default)]
pub struct Topic {
    pub name: String,
    pub subscribers: HashSet<ConnectionId>,
}

impl Topic {
    /// Creates a new topic with the given name and no subscribers.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: HashSet::new(),
        }
    }

    /// Adds a subscriber. Subscribing twice has no additional effect.
    pub fn subscribe(&mut self, id: ConnectionId) {
        self.subscribers.insert(id);
    }

    /// Removes a subscriber. Not an error if it was never subscribed.
    pub fn unsubscribe(&mut self, id: &ConnectionId) {
        self.subscribers.remove(id);
    }

    /// Returns whether the topic has any subscribers left.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
