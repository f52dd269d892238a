//! Static configuration: which cities to forecast, where their data lives, and what
//! counts as favorable weather.

use crate::types::condition::FavorableConditions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const YANDEX_SAMPLE_URL: &str = "https://code.s3.yandex.net/async-module";
const DEFAULT_WORKERS: usize = 4;

const DEFAULT_CITIES: [(&str, &str); 15] = [
    ("MOSCOW", "moscow-response.json"),
    ("PARIS", "paris-response.json"),
    ("LONDON", "london-response.json"),
    ("BERLIN", "berlin-response.json"),
    ("BEIJING", "beijing-response.json"),
    ("KAZAN", "kazan-response.json"),
    ("SPETERSBURG", "spetersburg-response.json"),
    ("VOLGOGRAD", "volgograd-response.json"),
    ("NOVOSIBIRSK", "novosibirsk-response.json"),
    ("KALININGRAD", "kaliningrad-response.json"),
    ("ABUDHABI", "abudhabi-response.json"),
    ("WARSZAWA", "warszawa-response.json"),
    ("BUCHAREST", "bucharest-response.json"),
    ("ROMA", "roma-response.json"),
    ("CAIRO", "cairo-response.json"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Config does not list any cities")]
    NoCities,
}

/// Run configuration for a [`TravelForecaster`](crate::TravelForecaster).
///
/// Every field has a default, so a config file only needs to list what it overrides:
///
/// ```json
/// {
///     "cities": { "MOSCOW": "https://example.com/moscow.json" },
///     "favorable_conditions": ["clear", "partly-cloudy"],
///     "workers": 8,
///     "fetch_timeout_secs": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// City display name to location identifier (a URL, or a file name for file sources).
    pub cities: BTreeMap<String, String>,
    pub favorable_conditions: FavorableConditions,
    /// Upper bound on concurrently running city fetches. Values below 1 are treated as 1.
    pub workers: usize,
    /// Deadline for a single city fetch. No deadline when unset.
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES
                .iter()
                .map(|(city, file)| (city.to_string(), format!("{YANDEX_SAMPLE_URL}/{file}")))
                .collect(),
            favorable_conditions: FavorableConditions::default(),
            workers: DEFAULT_WORKERS,
            fetch_timeout_secs: None,
        }
    }
}

impl ForecastConfig {
    /// Loads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] when the file cannot be loaded,
    /// and [`ConfigError::NoCities`] when it explicitly configures an empty city map.
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: ForecastConfig = serde_json::from_slice(&bytes)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cities.is_empty() {
            return Err(ConfigError::NoCities);
        }
        Ok(())
    }

    pub fn city_names(&self) -> Vec<String> {
        self.cities.keys().cloned().collect()
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}
