//! The set of weather condition labels that count as "favorable" for travelling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Condition labels treated as favorable (no precipitation).
///
/// Labels are matched exactly against the `condition` field of each hourly sample, so they
/// must use the provider's spelling (Yandex uses kebab-case, e.g. `partly-cloudy`).
///
/// # Examples
///
/// ```
/// use travel_forecast::FavorableConditions;
///
/// let favorable = FavorableConditions::default();
/// assert!(favorable.contains("clear"));
/// assert!(!favorable.contains("rain"));
///
/// let custom = FavorableConditions::new(["clear", "sunny"]);
/// assert!(custom.contains("sunny"));
/// assert!(!custom.contains("cloudy"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavorableConditions(BTreeSet<String>);

impl FavorableConditions {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, condition: &str) -> bool {
        self.0.contains(condition)
    }
}

impl Default for FavorableConditions {
    fn default() -> Self {
        Self::new(["clear", "partly-cloudy", "cloudy", "overcast"])
    }
}
