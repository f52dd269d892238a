//! The fetch boundary: anything that can turn a city name into a [`RawForecast`].

use crate::forecast::error::FetchError;
use crate::types::forecast::RawForecast;
use std::future::Future;

/// A provider of raw forecasts, keyed by city display name.
///
/// Implementations are shared between all workers of a
/// [`CityWorkerPool`](crate::CityWorkerPool), so they must be `Send + Sync` and cheap to call
/// concurrently.
pub trait ForecastSource: Send + Sync + 'static {
    fn fetch(&self, city: &str) -> impl Future<Output = Result<RawForecast, FetchError>> + Send;
}

pub(crate) fn parse_forecast(bytes: &[u8], location: &str) -> Result<RawForecast, FetchError> {
    serde_json::from_slice(bytes).map_err(|source| FetchError::JsonParse {
        location: location.to_string(),
        source,
    })
}
