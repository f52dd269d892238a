use crate::forecast::error::FetchError;
use crate::forecast::source::{parse_forecast, ForecastSource};
use crate::types::forecast::RawForecast;
use log::{info, warn};
use reqwest::Client;
use std::collections::BTreeMap;

/// Downloads forecasts over HTTP.
///
/// Each city name is looked up in the configured location map and the resulting URL is
/// fetched with a shared [`reqwest::Client`]. The response body must be a Yandex-style
/// forecast document.
pub struct HttpForecastSource {
    locations: BTreeMap<String, String>,
    download_client: Client,
}

impl HttpForecastSource {
    pub fn new(locations: BTreeMap<String, String>) -> Self {
        Self::with_client(locations, Client::new())
    }

    pub fn with_client(locations: BTreeMap<String, String>, download_client: Client) -> Self {
        Self {
            locations,
            download_client,
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;
        Ok(bytes.to_vec())
    }
}

impl ForecastSource for HttpForecastSource {
    async fn fetch(&self, city: &str) -> Result<RawForecast, FetchError> {
        let url = self
            .locations
            .get(city)
            .ok_or_else(|| FetchError::UnknownCity(city.to_string()))?;
        info!("Downloading forecast for {} from {}", city, url);
        let bytes = self.download(url).await?;
        let forecast = parse_forecast(&bytes, url)?;
        info!(
            "Finished downloading forecast for {} ({} days)",
            city,
            forecast.forecasts.len()
        );
        Ok(forecast)
    }
}
