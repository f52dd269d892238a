//! Per-city daytime summaries produced by the reducer and ranked afterwards.
//!
//! Field names are renamed on serialization so the JSON output stays compatible with
//! consumers of the original `data.json` format (`date_data`, `average_temp`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daytime figures for a single forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAverage {
    pub date: NaiveDate,
    /// Mean temperature over the daytime window, rounded to 2 decimals.
    #[serde(rename = "average_temp")]
    pub average_temperature: f64,
    /// Number of daytime hours whose condition is in the favorable set.
    #[serde(rename = "not_rainy_hours")]
    pub favorable_hour_count: u32,
}

/// The reduced forecast of one city.
///
/// Created by [`DayReducer::reduce`](crate::DayReducer::reduce). The only field written after
/// that is `rank`, which the [`Ranker`](crate::Ranker) fills in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummary {
    pub city: String,
    /// Days that had a computable daytime temperature, in forecast order.
    #[serde(rename = "date_data")]
    pub daily_breakdown: Vec<DayAverage>,
    /// Mean of the per-day averages. `None` when no day could be averaged.
    #[serde(rename = "average_temp")]
    pub average_temperature: Option<f64>,
    /// Mean favorable-hour count over days that had at least one daytime hour.
    #[serde(rename = "average_not_rainy_hours")]
    pub average_favorable_hours: Option<f64>,
    /// Accumulated rank, lower is better. `None` until ranking runs.
    #[serde(rename = "rating")]
    pub rank: Option<u32>,
}

impl CitySummary {
    /// Creates an unranked summary with no data, useful as a starting point.
    pub fn empty(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            daily_breakdown: Vec::new(),
            average_temperature: None,
            average_favorable_hours: None,
            rank: None,
        }
    }
}
