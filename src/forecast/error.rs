use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No location configured for city '{0}'")]
    UnknownCity(String),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read forecast file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse forecast JSON from {location}")]
    JsonParse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Fetching forecast for {city} timed out after {after:?}")]
    Timeout { city: String, after: Duration },
}
