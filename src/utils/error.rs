use thiserror::Error;

/// Errors that can take the server down during startup.
///
/// Runtime failures never reach this type: delivery errors are swallowed
/// per subscriber, persistence errors are logged inside the sink, and the
/// one-shot endpoint maps its own failures to HTTP responses.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid allowed origin {origin:?}")]
    InvalidOrigin { origin: String },

    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
