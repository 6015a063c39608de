use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::StoreSettings;
use crate::utils::error::RelayError;

/// Fire-and-forget forwarder of accepted location updates to the external
/// durable store.
///
/// `persist` spawns the write onto the runtime and returns immediately, so
/// the delivery path never waits on the store. Failures are logged inside
/// the spawned task and go nowhere else: no retry, no dead-letter, no error
/// back to the caller. The request timeout keeps a hung store from piling
/// up in-flight attempts forever.
#[derive(Debug, Clone)]
pub struct LocationStore {
    http: reqwest::Client,
    base_url: String,
}

impl LocationStore {
    pub fn new(settings: &StoreSettings) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Initiates `POST <base>/api/trip/location?id=<trip_id>` with the
    /// location payload as JSON body and returns without awaiting it.
    pub fn persist(&self, trip_id: &str, location: Value) {
        let url = format!("{}/api/trip/location", self.base_url);
        let http = self.http.clone();
        let trip_id = trip_id.to_string();

        tokio::spawn(async move {
            let result = http
                .post(&url)
                .query(&[("id", trip_id.as_str())])
                .json(&location)
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    info!(trip = %trip_id, "Location persisted to store");
                }
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    warn!(trip = %trip_id, %status, body = %body, "Store rejected location write");
                }
                Err(e) => {
                    warn!(trip = %trip_id, "Failed to reach location store: {e}");
                }
            }
        });
    }
}
