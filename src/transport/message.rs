use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound event on the WebSocket channel.
///
/// Frames are JSON objects tagged by `type` with camelCase fields, e.g.
/// `{"type":"update_location","tripId":"t1","bookingId":"b1","location":{…}}`.
/// All fields are optional at the serde level: this channel has no response
/// semantics, so events with missing identifiers are validated by the
/// handler and dropped silently rather than rejected.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Subscribe the sender to a booking room.
    #[serde(rename_all = "camelCase")]
    StartTracking {
        #[serde(default)]
        booking_id: Option<String>,
    },

    /// Unsubscribe the sender from a booking room.
    #[serde(rename_all = "camelCase")]
    StopTracking {
        #[serde(default)]
        booking_id: Option<String>,
    },

    /// Publish a position update for a trip.
    #[serde(rename_all = "camelCase")]
    UpdateLocation {
        #[serde(default)]
        trip_id: Option<String>,
        #[serde(default)]
        booking_id: Option<String>,
        #[serde(default)]
        location: Option<Value>,
    },
}

/// Picks the delivery topic for an update.
///
/// Web clients subscribe by booking room, so a room identifier on the
/// update is authoritative when `route_by_booking` is set; the trip
/// identifier is the fallback. Persistence always keys by trip identifier
/// regardless of what this returns.
pub fn routing_topic<'a>(
    trip_id: &'a str,
    booking_id: Option<&'a str>,
    route_by_booking: bool,
) -> &'a str {
    match booking_id {
        Some(room) if route_by_booking && !room.is_empty() => room,
        _ => trip_id,
    }
}
