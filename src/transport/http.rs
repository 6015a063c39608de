use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::transport::AppState;

/// Body of `POST /broadcast/location`.
///
/// Fields are optional at the serde level so a missing one yields the
/// endpoint's own 400 body instead of a framework rejection.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub location: Option<Value>,
}

/// Response body of `POST /broadcast/location`.
#[derive(Debug, Deserialize, Serialize)]
pub struct BroadcastResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BroadcastResponse {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            error: None,
        }
    }

    fn err(error: &str) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// POST /broadcast/location — one-shot update ingress for the mobile app.
///
/// Validates the body, fans the location out to the trip's subscribers
/// (there is no origin connection to exclude on this path), kicks off
/// persistence without awaiting it, and replies immediately. The reply
/// never reflects the persistence outcome.
pub async fn broadcast_location(
    State(state): State<AppState>,
    Json(req): Json<BroadcastRequest>,
) -> (StatusCode, Json<BroadcastResponse>) {
    let (trip_id, location) = match (req.trip_id, req.location) {
        (Some(t), Some(l)) if !t.is_empty() && !l.is_null() => (t, l),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(BroadcastResponse::err("Missing tripId or location data")),
            );
        }
    };

    match state.relay.lock() {
        Ok(relay) => relay.deliver(&trip_id, &location, None),
        Err(e) => {
            error!(trip = %trip_id, "Relay lock poisoned during broadcast: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BroadcastResponse::err("Internal server error")),
            );
        }
    }

    info!(trip = %trip_id, "Broadcasting location");
    state.store.persist(&trip_id, location);

    (
        StatusCode::OK,
        Json(BroadcastResponse::ok("Location broadcasted")),
    )
}
