use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::connection::{Connection, ConnectionId};
use crate::transport::AppState;
use crate::transport::message::{ClientEvent, routing_topic};

/// GET /ws — WebSocket upgrade for the streaming channel.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Drives one established WebSocket session: registers the connection,
/// forwards outbound frames from its channel, and feeds inbound text
/// frames to the event handler until the socket closes.
async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let conn = Connection::new(tx);
    let conn_id = conn.id;

    match state.relay.lock() {
        Ok(mut relay) => relay.register(conn),
        Err(_) => return,
    }
    info!(conn = %conn_id, "Client connected");

    // Forward frames from relay → client
    let forward = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming frames from the client
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => handle_event(&state, conn_id, &text),
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }

    info!(conn = %conn_id, "Client disconnected");
    if let Ok(mut relay) = state.relay.lock() {
        relay.unregister(conn_id);
    }
    forward.abort();
}

/// Handles one inbound frame from `sender`.
///
/// This channel has no response semantics: malformed frames and events
/// with missing identifiers are dropped silently. Runs synchronously so
/// the relay lock is never held across an await point.
pub(crate) fn handle_event(state: &AppState, sender: ConnectionId, raw: &str) {
    match serde_json::from_str::<ClientEvent>(raw) {
        Ok(ClientEvent::StartTracking { booking_id }) => {
            let Some(room) = booking_id.filter(|b| !b.is_empty()) else {
                debug!(conn = %sender, "Dropping start_tracking without bookingId");
                return;
            };
            info!(conn = %sender, %room, "Client subscribing to trip");
            if let Ok(mut relay) = state.relay.lock() {
                relay.join(sender, &room);
            }
        }

        Ok(ClientEvent::StopTracking { booking_id }) => {
            let Some(room) = booking_id.filter(|b| !b.is_empty()) else {
                debug!(conn = %sender, "Dropping stop_tracking without bookingId");
                return;
            };
            info!(conn = %sender, %room, "Client unsubscribing from trip");
            if let Ok(mut relay) = state.relay.lock() {
                relay.leave(sender, &room);
            }
        }

        Ok(ClientEvent::UpdateLocation {
            trip_id,
            booking_id,
            location,
        }) => {
            let (Some(trip_id), Some(location)) = (
                trip_id.filter(|t| !t.is_empty()),
                location.filter(|l| !l.is_null()),
            ) else {
                debug!(conn = %sender, "Dropping update_location with missing fields");
                return;
            };

            let route = routing_topic(&trip_id, booking_id.as_deref(), state.route_by_booking);
            if let Ok(relay) = state.relay.lock() {
                relay.deliver(route, &location, Some(sender));
            }
            // Persistence always keys by trip id; not awaited.
            state.store.persist(&trip_id, location);
        }

        Err(e) => {
            debug!(conn = %sender, "Ignoring malformed client event: {e}");
        }
    }
}
