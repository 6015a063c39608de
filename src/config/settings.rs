use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the server itself, cross-origin access, the
/// external location store, and relay routing behavior.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub store: StoreSettings,
    pub relay: RelaySettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to. Both ingress
/// adapters (WebSocket and the one-shot HTTP endpoint) share this port.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Cross-origin settings for the web client.
#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origin: String,
}

/// Settings for the external location store the relay persists to.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

/// Relay routing behavior.
///
/// When `route_by_booking` is set, an update that carries a booking room
/// identifier is delivered to that room rather than the trip topic. The
/// trip identifier is always the persistence key either way.
#[derive(Debug, Deserialize, Clone)]
pub struct RelaySettings {
    pub route_by_booking: bool,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub cors: Option<PartialCorsSettings>,
    pub store: Option<PartialStoreSettings>,
    pub relay: Option<PartialRelaySettings>,
}

/// Partial server settings.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial cross-origin settings.
#[derive(Debug, Deserialize)]
pub struct PartialCorsSettings {
    pub allowed_origin: Option<String>,
}

/// Partial location store settings.
#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Partial relay settings.
#[derive(Debug, Deserialize)]
pub struct PartialRelaySettings {
    pub route_by_booking: Option<bool>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            cors: CorsSettings {
                allowed_origin: "http://localhost:3000".to_string(),
            },
            store: StoreSettings {
                base_url: "http://localhost:5000".to_string(),
                request_timeout_secs: 10,
            },
            relay: RelaySettings {
                route_by_booking: true,
            },
        }
    }
}
