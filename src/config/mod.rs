mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{CorsSettings, RelaySettings, ServerSettings, Settings, StoreSettings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server, cors, store and relay configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        cors: CorsSettings {
            allowed_origin: partial
                .cors
                .as_ref()
                .and_then(|c| c.allowed_origin.clone())
                .unwrap_or(default.cors.allowed_origin),
        },
        store: StoreSettings {
            base_url: partial
                .store
                .as_ref()
                .and_then(|s| s.base_url.clone())
                .unwrap_or(default.store.base_url),
            request_timeout_secs: partial
                .store
                .as_ref()
                .and_then(|s| s.request_timeout_secs)
                .unwrap_or(default.store.request_timeout_secs),
        },
        relay: RelaySettings {
            route_by_booking: partial
                .relay
                .as_ref()
                .and_then(|r| r.route_by_booking)
                .unwrap_or(default.relay.route_by_booking),
        },
    })
}

#[cfg(test)]
mod tests;
