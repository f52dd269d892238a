//! Aggregates multi-day hourly forecasts for a set of cities into daytime summaries and
//! ranks the cities to recommend a travel destination.
//!
//! The pipeline has three stages:
//!
//! 1. a [`CityWorkerPool`] fetches every city through a [`ForecastSource`] and reduces it
//!    with a [`DayReducer`] on a bounded set of tokio tasks,
//! 2. the collector ([`pipeline::drain`]) takes the summaries off the shared queue until all
//!    workers have finished,
//! 3. the [`Ranker`] orders the cities and derives a [`Recommendation`].
//!
//! [`TravelForecaster`] runs all three and returns a [`ForecastReport`].

mod config;
mod error;
mod forecast;
mod forecaster;
pub mod pipeline;
mod rank;
pub mod reduce;
mod sink;
mod types;

pub use config::{ConfigError, ForecastConfig};
pub use error::TravelForecastError;
pub use forecaster::*;

pub use forecast::error::FetchError;
pub use forecast::file_source::FileForecastSource;
pub use forecast::http_source::HttpForecastSource;
pub use forecast::source::ForecastSource;

pub use pipeline::{CityFailure, CityWorkerPool, FailureKind, PoolReport};
pub use rank::ranker::{RankedForecast, Ranker};
pub use rank::recommendation::Recommendation;
pub use reduce::{DayReducer, ReduceError};
pub use sink::{JsonResultSink, SinkError};

pub use types::condition::FavorableConditions;
pub use types::forecast::{Day, HourSample, RawForecast};
pub use types::summary::{CitySummary, DayAverage};
