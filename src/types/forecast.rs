//! Defines the raw forecast payload returned by a [`ForecastSource`](crate::ForecastSource).
//!
//! The layout mirrors the Yandex Weather forecast response: a list of days, each holding
//! the hour-by-hour samples for that date. Only the fields needed for the daytime summary
//! are modelled; everything else in the payload is ignored during deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full multi-day forecast for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    /// One entry per forecast day, in the order the provider returned them.
    #[serde(default)]
    pub forecasts: Vec<Day>,
}

/// A single forecast day with its hourly samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// The calendar date this day covers (e.g. `2022-05-26`).
    pub date: NaiveDate,
    /// Hourly samples. Providers may send fewer than 24 (or none) near the forecast horizon.
    #[serde(default)]
    pub hours: Vec<HourSample>,
}

/// One hourly sample inside a [`Day`].
///
/// `hour` and `temp` are kept as raw JSON values because providers are inconsistent:
/// Yandex sends the hour as a string (`"9"`) while others send a number, and temperature
/// may be null or missing entirely. Interpretation happens in the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSample {
    #[serde(default)]
    pub hour: Value,
    #[serde(default)]
    pub temp: Option<Value>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl HourSample {
    /// Creates a well-formed sample.
    pub fn new(hour: u32, temp: i64, condition: &str) -> Self {
        Self {
            hour: Value::from(hour),
            temp: Some(Value::from(temp)),
            condition: Some(condition.to_string()),
        }
    }

    /// Interprets the `hour` field as an hour of day in `0..=23`.
    ///
    /// Accepts JSON integers and integer strings. Returns the offending raw value as a string
    /// when the field is anything else.
    pub fn hour_of_day(&self) -> Result<u32, String> {
        let parsed = match &self.hour {
            Value::Number(n) => n.as_u64().and_then(|h| u32::try_from(h).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        match parsed {
            Some(hour) if hour <= 23 => Ok(hour),
            _ => Err(self.hour.to_string()),
        }
    }
}
