use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-to-client event pushed to topic subscribers.
///
/// Serialized as a JSON text frame tagged by `type`, e.g.
/// `{"type":"new_location","location":{"lat":1,"lng":2}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    NewLocation { location: Value },
}
