//! The `transport` module holds the two ingress adapters and server wiring.
//!
//! It defines the wire protocol spoken with clients, the WebSocket channel
//! used by both web and mobile clients, and the one-shot HTTP endpoint the
//! mobile app posts to. Both adapters normalize input into the same
//! deliver-then-persist behavior against the relay engine.

pub mod http;
pub mod message;
pub mod websocket;

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{CorsSettings, Settings};
use crate::persistence::LocationStore;
use crate::relay::Relay;
use crate::utils::error::RelayError;

/// Shared state handed to both ingress adapters.
///
/// The relay engine is the only shared mutable resource; the store client
/// is clone-cheap and lock-free, so persistence never contends with the
/// dispatch path.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Mutex<Relay>>,
    pub store: LocationStore,
    pub route_by_booking: bool,
}

impl AppState {
    pub fn new(relay: Arc<Mutex<Relay>>, store: LocationStore, route_by_booking: bool) -> Self {
        Self {
            relay,
            store,
            route_by_booking,
        }
    }
}

/// Builds the router serving both ingress adapters.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(websocket::ws_handler))
        .route("/broadcast/location", post(http::broadcast_location))
        .with_state(state)
}

/// Builds a CORS layer restricted to the configured web client origin.
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer, RelayError> {
    let origin = settings
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|_| RelayError::InvalidOrigin {
            origin: settings.allowed_origin.clone(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Binds the configured address and serves both ingress adapters on it.
pub async fn start_server(settings: &Settings, state: AppState) -> Result<(), RelayError> {
    let app = build_router(state)
        .layer(cors_layer(&settings.cors)?)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Tracking server running on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests;
