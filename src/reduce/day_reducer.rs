//! Reduces one city's raw forecast into a [`CitySummary`].

use crate::reduce::average::{average, Sample};
use crate::reduce::error::ReduceError;
use crate::types::condition::FavorableConditions;
use crate::types::forecast::{Day, RawForecast};
use crate::types::summary::{CitySummary, DayAverage};
use log::debug;
use std::ops::RangeInclusive;

/// Hours of the day (inclusive) that are considered when summarizing a day.
pub const DAYTIME_HOURS: RangeInclusive<u32> = 9..=19;

/// What a single day contributed to the city-level averages.
struct DayFigures {
    favorable_hour_count: u32,
    average_temperature: Option<f64>,
}

/// Turns raw forecasts into per-city daytime summaries.
///
/// A reducer is a pure function of the payload and the favorable-condition set; it holds
/// no state between calls and can be shared freely between workers.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use travel_forecast::{Day, DayReducer, FavorableConditions, HourSample, RawForecast};
///
/// let raw = RawForecast {
///     forecasts: vec![Day {
///         date: NaiveDate::from_ymd_opt(2022, 5, 26).unwrap(),
///         hours: vec![
///             HourSample::new(9, 10, "clear"),
///             HourSample::new(19, 20, "rain"),
///         ],
///     }],
/// };
///
/// let reducer = DayReducer::new(FavorableConditions::default());
/// let summary = reducer.reduce("MOSCOW", &raw).unwrap();
/// assert_eq!(summary.daily_breakdown[0].average_temperature, 15.0);
/// assert_eq!(summary.daily_breakdown[0].favorable_hour_count, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DayReducer {
    favorable: FavorableConditions,
}

impl DayReducer {
    pub fn new(favorable: FavorableConditions) -> Self {
        Self { favorable }
    }

    /// Reduces a whole forecast.
    ///
    /// Days without any sample inside [`DAYTIME_HOURS`] are skipped entirely. Days whose
    /// daytime temperatures cannot be averaged still count toward the favorable-hours
    /// average but are left out of the breakdown and the temperature average.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::MalformedSample`] if any hourly sample carries an hour that is
    /// not an integer in `0..=23`. The city is not summarized in that case.
    pub fn reduce(&self, city: &str, raw: &RawForecast) -> Result<CitySummary, ReduceError> {
        let mut summary = CitySummary::empty(city);
        let mut day_temperatures = Vec::with_capacity(raw.forecasts.len());
        let mut favorable_counts = Vec::with_capacity(raw.forecasts.len());

        for day in &raw.forecasts {
            let Some(figures) = self.reduce_day(city, day)? else {
                debug!("No daytime hours for {} on {}, skipping day", city, day.date);
                continue;
            };
            favorable_counts.push(figures.favorable_hour_count);

            match figures.average_temperature {
                Some(average_temperature) => {
                    day_temperatures.push(average_temperature);
                    summary.daily_breakdown.push(DayAverage {
                        date: day.date,
                        average_temperature,
                        favorable_hour_count: figures.favorable_hour_count,
                    });
                }
                None => debug!(
                    "Daytime temperature for {} on {} is not computable",
                    city, day.date
                ),
            }
        }

        summary.average_temperature = average(day_temperatures);
        summary.average_favorable_hours = average(favorable_counts);
        Ok(summary)
    }

    /// Returns `None` if the day has no daytime samples.
    fn reduce_day(&self, city: &str, day: &Day) -> Result<Option<DayFigures>, ReduceError> {
        let mut temperatures = Vec::new();
        let mut favorable_hour_count = 0;
        let mut has_daytime = false;

        for sample in &day.hours {
            let hour = sample
                .hour_of_day()
                .map_err(|value| ReduceError::MalformedSample {
                    city: city.to_string(),
                    date: day.date,
                    value,
                })?;
            if !DAYTIME_HOURS.contains(&hour) {
                continue;
            }
            has_daytime = true;
            temperatures.push(Sample::from_json(sample.temp.as_ref()));
            if sample
                .condition
                .as_deref()
                .is_some_and(|c| self.favorable.contains(c))
            {
                favorable_hour_count += 1;
            }
        }

        if !has_daytime {
            return Ok(None);
        }
        Ok(Some(DayFigures {
            favorable_hour_count,
            average_temperature: average(temperatures),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::forecast::HourSample;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 5, day).unwrap()
    }

    fn day(d: u32, hours: Vec<HourSample>) -> Day {
        Day {
            date: date(d),
            hours,
        }
    }

    fn reducer() -> DayReducer {
        DayReducer::default()
    }

    #[test]
    fn test_window_edges_are_inclusive() -> Result<(), ReduceError> {
        let raw = RawForecast {
            forecasts: vec![day(
                26,
                vec![
                    HourSample::new(8, 100, "clear"),
                    HourSample::new(9, 10, "clear"),
                    HourSample::new(19, 20, "rain"),
                    HourSample::new(20, -100, "clear"),
                ],
            )],
        };
        let summary = reducer().reduce("MOSCOW", &raw)?;

        assert_eq!(
            summary.daily_breakdown,
            vec![DayAverage {
                date: date(26),
                average_temperature: 15.0,
                favorable_hour_count: 1,
            }]
        );
        assert_eq!(summary.average_temperature, Some(15.0));
        assert_eq!(summary.average_favorable_hours, Some(1.0));
        assert_eq!(summary.rank, None);
        Ok(())
    }

    #[test]
    fn test_day_without_daytime_hours_is_skipped() -> Result<(), ReduceError> {
        let raw = RawForecast {
            forecasts: vec![
                day(26, vec![HourSample::new(12, 20, "cloudy")]),
                day(27, vec![HourSample::new(2, 5, "clear"), HourSample::new(23, 4, "clear")]),
                day(28, vec![]),
            ],
        };
        let summary = reducer().reduce("PARIS", &raw)?;

        assert_eq!(summary.daily_breakdown.len(), 1);
        assert_eq!(summary.daily_breakdown[0].date, date(26));
        // Only the first day feeds the favorable-hours average, so it stays at 1.
        assert_eq!(summary.average_favorable_hours, Some(1.0));
        assert_eq!(summary.average_temperature, Some(20.0));
        Ok(())
    }

    #[test]
    fn test_uncomputable_day_still_counts_favorable_hours() -> Result<(), ReduceError> {
        let mut no_temp = HourSample::new(10, 0, "clear");
        no_temp.temp = Some(Value::Null);
        let mut missing_temp = HourSample::new(11, 0, "partly-cloudy");
        missing_temp.temp = None;

        let raw = RawForecast {
            forecasts: vec![
                day(26, vec![no_temp, missing_temp]),
                day(27, vec![HourSample::new(12, 18, "rain")]),
            ],
        };
        let summary = reducer().reduce("LONDON", &raw)?;

        assert_eq!(summary.daily_breakdown.len(), 1);
        assert_eq!(summary.daily_breakdown[0].date, date(27));
        assert_eq!(summary.average_temperature, Some(18.0));
        // Day 26 contributes 2 favorable hours, day 27 contributes 0.
        assert_eq!(summary.average_favorable_hours, Some(1.0));
        Ok(())
    }

    #[test]
    fn test_zero_degrees_is_a_valid_day() -> Result<(), ReduceError> {
        let raw = RawForecast {
            forecasts: vec![day(
                26,
                vec![HourSample::new(9, 0, "snow"), HourSample::new(10, 0, "snow")],
            )],
        };
        let summary = reducer().reduce("NOVOSIBIRSK", &raw)?;

        assert_eq!(summary.daily_breakdown.len(), 1);
        assert_eq!(summary.daily_breakdown[0].average_temperature, 0.0);
        assert_eq!(summary.average_temperature, Some(0.0));
        assert_eq!(summary.average_favorable_hours, Some(0.0));
        Ok(())
    }

    #[test]
    fn test_invalid_temperature_makes_day_not_computable() -> Result<(), ReduceError> {
        let mut garbage = HourSample::new(13, 0, "clear");
        garbage.temp = Some(json!({"value": 12}));

        let raw = RawForecast {
            forecasts: vec![day(26, vec![HourSample::new(12, 20, "clear"), garbage])],
        };
        let summary = reducer().reduce("BERLIN", &raw)?;

        assert!(summary.daily_breakdown.is_empty());
        assert_eq!(summary.average_temperature, None);
        assert_eq!(summary.average_favorable_hours, Some(2.0));
        Ok(())
    }

    #[test]
    fn test_city_average_truncates_day_averages() -> Result<(), ReduceError> {
        let raw = RawForecast {
            forecasts: vec![
                day(26, vec![HourSample::new(9, 10, "clear"), HourSample::new(10, 11, "clear")]),
                day(27, vec![HourSample::new(9, 13, "rain")]),
            ],
        };
        let summary = reducer().reduce("ROMA", &raw)?;

        assert_eq!(summary.daily_breakdown[0].average_temperature, 10.5);
        // 10.5 is kept as 10 before averaging with 13.
        assert_eq!(summary.average_temperature, Some(11.5));
        assert_eq!(summary.average_favorable_hours, Some(1.0));
        Ok(())
    }

    #[test]
    fn test_empty_forecast_has_absent_averages() -> Result<(), ReduceError> {
        let summary = reducer().reduce("CAIRO", &RawForecast { forecasts: vec![] })?;
        assert_eq!(summary, CitySummary::empty("CAIRO"));
        Ok(())
    }

    #[test]
    fn test_malformed_hour_aborts_city() {
        let mut bad = HourSample::new(0, 5, "clear");
        bad.hour = json!("midnight");

        let raw = RawForecast {
            forecasts: vec![day(26, vec![HourSample::new(12, 20, "clear"), bad])],
        };
        let err = reducer().reduce("KAZAN", &raw).unwrap_err();

        match err {
            ReduceError::MalformedSample { city, date: d, value } => {
                assert_eq!(city, "KAZAN");
                assert_eq!(d, date(26));
                assert_eq!(value, "\"midnight\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_favorable_conditions() -> Result<(), ReduceError> {
        let reducer = DayReducer::new(FavorableConditions::new(["rain"]));
        let raw = RawForecast {
            forecasts: vec![day(
                26,
                vec![HourSample::new(9, 10, "rain"), HourSample::new(10, 10, "clear")],
            )],
        };
        let summary = reducer.reduce("BEIJING", &raw)?;
        assert_eq!(summary.daily_breakdown[0].favorable_hour_count, 1);
        Ok(())
    }
}
