use std::sync::{Arc, Mutex};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::StoreSettings;
use crate::connection::{Connection, ConnectionId};
use crate::persistence::LocationStore;
use crate::relay::{Relay, ServerEvent};
use crate::transport::http::BroadcastResponse;
use crate::transport::message::routing_topic;
use crate::transport::websocket::handle_event;
use crate::transport::{AppState, build_router};

fn test_state() -> AppState {
    let store = LocationStore::new(&StoreSettings {
        // Nothing listens here; persistence simply logs its failure.
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 1,
    })
    .expect("store client builds");
    AppState::new(Arc::new(Mutex::new(Relay::new())), store, true)
}

fn subscribe(state: &AppState, topic: &str) -> (ConnectionId, UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let conn = Connection::new(tx);
    let id = conn.id;
    let mut relay = state.relay.lock().unwrap();
    relay.register(conn);
    relay.join(id, topic);
    (id, rx)
}

fn recv_location(rx: &mut UnboundedReceiver<String>) -> serde_json::Value {
    let frame = rx.try_recv().expect("expected a frame");
    match serde_json::from_str::<ServerEvent>(&frame).expect("frame should parse") {
        ServerEvent::NewLocation { location } => location,
    }
}

#[test]
fn test_routing_topic_prefers_booking_room() {
    assert_eq!(routing_topic("trip-42", Some("book-9"), true), "book-9");
}

#[test]
fn test_routing_topic_falls_back_to_trip() {
    assert_eq!(routing_topic("trip-42", None, true), "trip-42");
    assert_eq!(routing_topic("trip-42", Some(""), true), "trip-42");
}

#[test]
fn test_routing_topic_policy_disabled() {
    assert_eq!(routing_topic("trip-42", Some("book-9"), false), "trip-42");
}

#[test]
fn test_handle_start_tracking() {
    let state = test_state();
    let sender = Uuid::new_v4();

    let msg = json!({"type": "start_tracking", "bookingId": "book-9"}).to_string();
    handle_event(&state, sender, &msg);

    let relay = state.relay.lock().unwrap();
    assert!(relay.members_of("book-9").contains(&sender));
}

#[test]
fn test_handle_start_tracking_without_booking_id() {
    let state = test_state();

    handle_event(&state, Uuid::new_v4(), &json!({"type": "start_tracking"}).to_string());
    handle_event(
        &state,
        Uuid::new_v4(),
        &json!({"type": "start_tracking", "bookingId": ""}).to_string(),
    );

    assert_eq!(state.relay.lock().unwrap().topic_count(), 0);
}

#[test]
fn test_handle_stop_tracking() {
    let state = test_state();
    let sender = Uuid::new_v4();
    state.relay.lock().unwrap().join(sender, "book-9");

    let msg = json!({"type": "stop_tracking", "bookingId": "book-9"}).to_string();
    handle_event(&state, sender, &msg);

    assert!(!state.relay.lock().unwrap().members_of("book-9").contains(&sender));
}

#[tokio::test]
async fn test_handle_update_location_routes_to_booking_room() {
    let state = test_state();
    let (_watcher, mut rx) = subscribe(&state, "book-9");
    let sender = Uuid::new_v4();

    let msg = json!({
        "type": "update_location",
        "tripId": "trip-42",
        "bookingId": "book-9",
        "location": {"lat": 5, "lng": 6}
    })
    .to_string();
    handle_event(&state, sender, &msg);

    assert_eq!(recv_location(&mut rx), json!({"lat": 5, "lng": 6}));
}

#[tokio::test]
async fn test_handle_update_location_does_not_echo_to_sender() {
    let state = test_state();
    let (watcher, mut rx) = subscribe(&state, "trip-42");

    // The sender is itself subscribed to the topic it publishes on.
    let msg = json!({
        "type": "update_location",
        "tripId": "trip-42",
        "location": {"lat": 1, "lng": 2}
    })
    .to_string();
    handle_event(&state, watcher, &msg);

    assert!(rx.try_recv().is_err(), "sender must not receive its own update");
}

#[test]
fn test_handle_update_location_with_missing_fields_is_dropped() {
    let state = test_state();
    let (_watcher, mut rx) = subscribe(&state, "trip-42");

    let no_location = json!({"type": "update_location", "tripId": "trip-42"}).to_string();
    handle_event(&state, Uuid::new_v4(), &no_location);

    let null_location =
        json!({"type": "update_location", "tripId": "trip-42", "location": null}).to_string();
    handle_event(&state, Uuid::new_v4(), &null_location);

    let no_trip = json!({"type": "update_location", "location": {"lat": 1}}).to_string();
    handle_event(&state, Uuid::new_v4(), &no_trip);

    assert!(rx.try_recv().is_err());
}

#[test]
fn test_malformed_frames_are_ignored() {
    let state = test_state();
    handle_event(&state, Uuid::new_v4(), "not json at all");
    handle_event(&state, Uuid::new_v4(), &json!({"type": "unknown_event"}).to_string());
    assert_eq!(state.relay.lock().unwrap().topic_count(), 0);
}

async fn post_broadcast(state: AppState, body: serde_json::Value) -> (StatusCode, BroadcastResponse) {
    let app = build_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/broadcast/location")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let parsed = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, parsed)
}

#[tokio::test]
async fn test_broadcast_missing_location_returns_400() {
    let state = test_state();
    let (_watcher, mut rx) = subscribe(&state, "t1");

    let (status, body) = post_broadcast(state, json!({"tripId": "t1"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.success);
    assert_eq!(body.error.as_deref(), Some("Missing tripId or location data"));
    assert!(rx.try_recv().is_err(), "no delivery on a rejected request");
}

#[tokio::test]
async fn test_broadcast_missing_trip_id_returns_400() {
    let state = test_state();
    let (status, body) = post_broadcast(state, json!({"location": {"lat": 1}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.success);
}

#[tokio::test]
async fn test_broadcast_delivers_and_returns_200() {
    let state = test_state();
    let (_watcher, mut rx) = subscribe(&state, "trip-42");

    let (status, body) = post_broadcast(
        state,
        json!({"tripId": "trip-42", "location": {"lat": 1, "lng": 2}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.success);
    assert_eq!(body.message.as_deref(), Some("Location broadcasted"));
    assert_eq!(recv_location(&mut rx), json!({"lat": 1, "lng": 2}));
}
