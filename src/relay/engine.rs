use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::connection::{Connection, ConnectionId};
use crate::relay::event::ServerEvent;
use crate::relay::topic::Topic;

/// The relay engine: tracks live connections and per-trip subscriber
/// groups, and fans location updates out to them.
///
/// The engine is the only shared mutable state in the server. The
/// transport layer holds it behind `Arc<Mutex<Relay>>` and never keeps
/// the lock across an await point; every send below is a non-blocking
/// push onto a connection's unbounded channel, so a slow subscriber can
/// never stall dispatch for the others.
#[derive(Debug, Default)]
pub struct Relay {
    topics: HashMap<String, Topic>,
    connections: HashMap<ConnectionId, Connection>,
}

impl Relay {
    /// Creates a relay with no topics and no connections.
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
            connections: HashMap::new(),
        }
    }

    /// Registers a newly accepted connection.
    pub fn register(&mut self, conn: Connection) {
        self.connections.insert(conn.id, conn);
    }

    /// Removes a connection and every membership edge it holds.
    ///
    /// Topics whose member set becomes empty are dropped, so a churn of
    /// connects and disconnects leaves no dangling entries behind.
    pub fn unregister(&mut self, id: ConnectionId) {
        self.connections.remove(&id);
        self.topics.retain(|_, topic| {
            topic.unsubscribe(&id);
            !topic.is_empty()
        });
    }

    /// Subscribes a connection to a topic, creating the topic on first join.
    /// Joining twice has no additional effect. An empty topic id is a
    /// silent no-op: subscription is advisory, malformed joins are dropped.
    pub fn join(&mut self, id: ConnectionId, topic: &str) {
        if topic.is_empty() {
            debug!(conn = %id, "Ignoring join with empty topic id");
            return;
        }
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic))
            .subscribe(id);
    }

    /// Unsubscribes a connection from a topic. A no-op if the edge (or the
    /// topic itself) does not exist; drops the topic once it has no members.
    pub fn leave(&mut self, id: ConnectionId, topic: &str) {
        if let Some(t) = self.topics.get_mut(topic) {
            t.unsubscribe(&id);
            if t.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    /// Returns a snapshot of the member set of a topic.
    /// Unknown topics yield an empty set.
    pub fn members_of(&self, topic: &str) -> HashSet<ConnectionId> {
        self.topics
            .get(topic)
            .map(|t| t.subscribers.clone())
            .unwrap_or_default()
    }

    /// Delivers a location payload to every member of `topic` except
    /// `exclude`, as a `new_location` event.
    ///
    /// A topic with no members is a successful no-op: subscribers may not
    /// exist yet. Delivery is best-effort per member; a closed channel is
    /// logged and skipped without aborting the rest of the batch, and no
    /// failure is ever surfaced to the caller.
    pub fn deliver(&self, topic: &str, location: &Value, exclude: Option<ConnectionId>) {
        let Some(members) = self.topics.get(topic) else {
            debug!(topic, "No subscribers for topic, dropping update");
            return;
        };

        let event = ServerEvent::NewLocation {
            location: location.clone(),
        };
        let frame = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize new_location event: {e}");
                return;
            }
        };

        for id in &members.subscribers {
            if Some(*id) == exclude {
                continue;
            }
            if let Some(conn) = self.connections.get(id) {
                if conn.sender.send(frame.clone()).is_err() {
                    warn!(conn = %id, topic, "Subscriber channel closed, skipping");
                }
            }
        }
    }

    /// Number of live topics. Empty topics are dropped eagerly, so this
    /// counts topics with at least one member.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Number of registered connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
