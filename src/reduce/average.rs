//! The averaging rule shared by per-day and per-city reductions.
//!
//! Zero is a real data point and must never be confused with "nothing to average".
//! Absent values are dropped, every kept value is truncated to an integer, and an empty
//! input yields `None` rather than `0.0`.

use log::error;
use serde_json::Value;

/// One input value to [`average`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Null, missing or empty. Skipped.
    Absent,
    Value(f64),
    /// Present but not coercible to a number. Makes the whole average not computable.
    Invalid,
}

impl Sample {
    /// Interprets a raw JSON field.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Sample::Absent,
            Some(Value::Number(n)) => n.as_f64().map_or(Sample::Invalid, Sample::Value),
            Some(Value::String(s)) if s.trim().is_empty() => Sample::Absent,
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map_or(Sample::Invalid, Sample::Value),
            Some(_) => Sample::Invalid,
        }
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Sample::Value(value)
        } else {
            Sample::Invalid
        }
    }
}

impl From<u32> for Sample {
    fn from(value: u32) -> Self {
        Sample::Value(f64::from(value))
    }
}

impl From<Option<f64>> for Sample {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Sample::Absent, Sample::from)
    }
}

/// Averages the present values, truncated to integers, rounded to 2 decimals.
///
/// Returns `None` when nothing is left to average or when any value is [`Sample::Invalid`].
///
/// # Examples
///
/// ```
/// use travel_forecast::reduce::{average, Sample};
///
/// assert_eq!(average([0u32]), Some(0.0));
/// assert_eq!(average(Vec::<u32>::new()), None);
/// assert_eq!(average([Sample::Absent, Sample::Value(0.0)]), Some(0.0));
/// assert_eq!(average([10u32, 11]), Some(10.5));
/// // Kept values are truncated before averaging.
/// assert_eq!(average([15.9, 16.2]), Some(15.5));
/// ```
pub fn average<I, S>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = S>,
    S: Into<Sample>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for sample in values.into_iter().map(Into::into) {
        match sample {
            Sample::Absent => {}
            Sample::Value(v) => {
                sum += v.trunc();
                count += 1;
            }
            Sample::Invalid => {
                error!("Encountered a value that cannot be averaged, result is not computable");
                return None;
            }
        }
    }
    if count == 0 {
        return None;
    }
    Some(round_2(sum / count as f64))
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
