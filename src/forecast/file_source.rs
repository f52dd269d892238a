use crate::forecast::error::FetchError;
use crate::forecast::source::{parse_forecast, ForecastSource};
use crate::types::forecast::RawForecast;
use log::info;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Reads forecasts from JSON files in a local directory.
///
/// The location identifier of each city is reduced to its last path segment, so a config
/// pointing at `https://.../moscow-response.json` reads `<data_dir>/moscow-response.json`.
/// This lets the same city catalogue work against a directory of saved responses.
pub struct FileForecastSource {
    data_dir: PathBuf,
    locations: BTreeMap<String, String>,
}

impl FileForecastSource {
    pub fn new(data_dir: impl Into<PathBuf>, locations: BTreeMap<String, String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            locations,
        }
    }

    fn path_for(&self, city: &str) -> Result<PathBuf, FetchError> {
        let location = self
            .locations
            .get(city)
            .ok_or_else(|| FetchError::UnknownCity(city.to_string()))?;
        let file_name = location.rsplit('/').next().unwrap_or(location);
        Ok(self.data_dir.join(file_name))
    }
}

impl ForecastSource for FileForecastSource {
    async fn fetch(&self, city: &str) -> Result<RawForecast, FetchError> {
        let path = self.path_for(city)?;
        info!("Reading forecast for {} from {:?}", city, path);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| FetchError::FileRead(path.clone(), e))?;
        parse_forecast(&bytes, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn locations() -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "MOSCOW".to_string(),
                "https://code.s3.yandex.net/async-module/moscow-response.json".to_string(),
            ),
            ("PARIS".to_string(), "paris-response.json".to_string()),
        ])
    }

    #[tokio::test]
    async fn test_reads_file_named_after_location() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut file = std::fs::File::create(dir.path().join("moscow-response.json"))?;
        write!(
            file,
            r#"{{"forecasts": [{{"date": "2022-05-26", "hours": [{{"hour": "9", "temp": 12, "condition": "clear"}}]}}]}}"#
        )?;

        let source = FileForecastSource::new(dir.path(), locations());
        let forecast = source.fetch("MOSCOW").await?;
        assert_eq!(forecast.forecasts.len(), 1);
        assert_eq!(forecast.forecasts[0].hours.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_and_bad_json() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let source = FileForecastSource::new(dir.path(), locations());

        let err = source.fetch("PARIS").await.unwrap_err();
        assert!(matches!(err, FetchError::FileRead(..)));

        std::fs::write(dir.path().join("paris-response.json"), b"{not json")?;
        let err = source.fetch("PARIS").await.unwrap_err();
        assert!(matches!(err, FetchError::JsonParse { .. }));

        let err = source.fetch("LIMA").await.unwrap_err();
        assert!(matches!(err, FetchError::UnknownCity(_)));
        Ok(())
    }
}
