use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("Malformed hour value {value} in forecast for {city} on {date}")]
    MalformedSample {
        city: String,
        date: NaiveDate,
        value: String,
    },

    #[error("Reduction task for {city} failed to complete")]
    TaskJoin {
        city: String,
        #[source]
        source: tokio::task::JoinError,
    },
}
