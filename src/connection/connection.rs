use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Opaque, server-assigned identity of one live WebSocket session.
pub type ConnectionId = Uuid;

/// Represents a connected WebSocket client in the relay.
///
/// Each connection is uniquely identified by an `id` and has a channel
/// (`sender`) for pushing serialized outbound frames to its socket task.
#[derive(Debug)]
pub struct Connection {
    /// Unique identifier for the connection, assigned on accept.
    pub id: ConnectionId,

    /// Channel to send serialized JSON frames to the client.
    pub sender: UnboundedSender<String>,
}

impl Connection {
    /// Creates a connection with a fresh identity around the given
    /// outbound channel.
    pub fn new(sender: UnboundedSender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
        }
    }
}
