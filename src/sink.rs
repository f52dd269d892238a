//! Writes the ranked forecast as a JSON document.

use crate::types::summary::CitySummary;
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize ranked forecast")]
    Serialize(#[from] serde_json::Error),

    #[error("Serialized forecast is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Failed to write result file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}

#[derive(Serialize)]
struct ForecastDocument<'a> {
    forecasting: &'a [CitySummary],
}

/// Persists ranked summaries as `{"forecasting": [...]}`, indented with four spaces.
pub struct JsonResultSink;

impl JsonResultSink {
    pub fn to_json(ranked: &[CitySummary]) -> Result<String, SinkError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        ForecastDocument {
            forecasting: ranked,
        }
        .serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(String::from_utf8(buffer)?)
    }

    pub async fn write(path: &Path, ranked: &[CitySummary]) -> Result<(), SinkError> {
        let json = Self::to_json(ranked)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| SinkError::Write(path.to_path_buf(), e))?;
        info!("Result saved in file {:?}", path);
        Ok(())
    }
}
