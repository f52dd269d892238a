//! The main entry point: wires the worker pool, the collector and the ranker together.

use crate::config::ForecastConfig;
use crate::error::TravelForecastError;
use crate::forecast::source::ForecastSource;
use crate::pipeline::collector::drain;
use crate::pipeline::report::CityFailure;
use crate::pipeline::worker_pool::CityWorkerPool;
use crate::rank::ranker::Ranker;
use crate::rank::recommendation::Recommendation;
use crate::reduce::day_reducer::DayReducer;
use crate::types::summary::CitySummary;
use bon::bon;
use std::sync::Arc;

/// Everything one run produced.
#[derive(Debug)]
pub struct ForecastReport {
    /// Successfully reduced cities, best first.
    pub ranked: Vec<CitySummary>,
    pub recommendation: Recommendation,
    /// Cities left out of `ranked`, with the reason.
    pub failures: Vec<CityFailure>,
}

impl ForecastReport {
    pub fn excluded_cities(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.city.as_str()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the full forecast aggregation for every configured city.
///
/// # Examples
///
/// ```no_run
/// # use travel_forecast::{ForecastConfig, HttpForecastSource, TravelForecaster, TravelForecastError};
/// # use std::sync::Arc;
/// # #[tokio::main]
/// # async fn main() -> Result<(), TravelForecastError> {
/// let config = ForecastConfig::default();
/// let source = Arc::new(HttpForecastSource::new(config.cities.clone()));
///
/// let forecaster = TravelForecaster::builder()
///     .config(config)
///     .source(source)
///     .build();
///
/// let report = forecaster.run().await?;
/// println!("{}", report.recommendation);
/// for city in report.excluded_cities() {
///     println!("excluded: {city}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct TravelForecaster<S> {
    config: ForecastConfig,
    source: Arc<S>,
}

#[bon]
impl<S: ForecastSource> TravelForecaster<S> {
    /// Creates a forecaster.
    ///
    /// * `.source(Arc<S>)`: **Required.** Where raw forecasts come from.
    /// * `.config(ForecastConfig)`: Optional. Defaults to [`ForecastConfig::default()`].
    #[builder]
    pub fn new(source: Arc<S>, config: Option<ForecastConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
            source,
        }
    }

    /// Fetches, reduces, collects and ranks every configured city.
    ///
    /// Cities that fail to fetch or reduce are listed in [`ForecastReport::failures`]; the
    /// remaining cities are still ranked.
    ///
    /// # Errors
    ///
    /// Returns [`TravelForecastError::Config`] when no city is configured and
    /// [`TravelForecastError::ProducerJoin`] if the producer stage itself crashed.
    pub async fn run(&self) -> Result<ForecastReport, TravelForecastError> {
        self.config.validate()?;

        let pool = CityWorkerPool::builder()
            .source(Arc::clone(&self.source))
            .reducer(DayReducer::new(self.config.favorable_conditions.clone()))
            .workers(self.config.workers)
            .maybe_fetch_timeout(self.config.fetch_timeout())
            .build();

        let (queue, producer) = pool.run_all(self.config.city_names());
        let collected = drain(queue).await;
        let pool_report = producer
            .wait()
            .await
            .map_err(TravelForecastError::ProducerJoin)?;

        let ranked = Ranker::rank(collected);

        Ok(ForecastReport {
            ranked: ranked.summaries,
            recommendation: ranked.recommendation,
            failures: pool_report.failures,
        })
    }
}
