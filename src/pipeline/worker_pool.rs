//! The producer half of the pipeline: fetches and reduces every city on a bounded pool of
//! tokio tasks and pushes the summaries onto a shared queue.

use crate::forecast::error::FetchError;
use crate::forecast::source::ForecastSource;
use crate::pipeline::report::{CityFailure, FailureKind, PoolReport};
use crate::reduce::day_reducer::DayReducer;
use crate::reduce::error::ReduceError;
use crate::types::forecast::RawForecast;
use crate::types::summary::CitySummary;
use bon::bon;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinHandle, JoinSet};

/// Receiving end of the summary queue.
///
/// The queue closes once every worker has finished and dropped its sender, so
/// `recv()` returning `None` means "empty and production complete", never just "empty".
pub type SummaryQueue = mpsc::UnboundedReceiver<CitySummary>;

/// Resolves to the [`PoolReport`] once every city has either produced a summary or failed.
pub struct ProducerHandle {
    handle: JoinHandle<PoolReport>,
}

impl ProducerHandle {
    pub async fn wait(self) -> Result<PoolReport, JoinError> {
        self.handle.await
    }
}

/// Runs [`DayReducer`] for many cities concurrently.
///
/// At most `workers` cities are fetched and reduced at once. A failing city never stops its
/// siblings; the failure is collected into the [`PoolReport`] instead.
pub struct CityWorkerPool<S> {
    source: Arc<S>,
    reducer: Arc<DayReducer>,
    workers: usize,
    fetch_timeout: Option<Duration>,
}

#[bon]
impl<S: ForecastSource> CityWorkerPool<S> {
    /// Creates a pool.
    ///
    /// # Arguments
    ///
    /// * `.source(Arc<S>)`: **Required.** Where raw forecasts come from.
    /// * `.reducer(DayReducer)`: **Required.** The reducer, carrying the favorable-condition set.
    /// * `.workers(usize)`: Optional. Maximum concurrent cities. Defaults to `4`, clamped to
    ///   `1..=Semaphore::MAX_PERMITS`.
    /// * `.fetch_timeout(Duration)`: Optional. Deadline for each fetch. No deadline by default.
    #[builder]
    pub fn new(
        source: Arc<S>,
        reducer: DayReducer,
        workers: Option<usize>,
        fetch_timeout: Option<Duration>,
    ) -> Self {
        Self {
            source,
            reducer: Arc::new(reducer),
            workers: workers.unwrap_or(4).clamp(1, Semaphore::MAX_PERMITS),
            fetch_timeout,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Starts processing every city and returns immediately.
    ///
    /// Summaries arrive on the returned [`SummaryQueue`] in completion order. Duplicate city
    /// names are processed once. Must be called from within a tokio runtime.
    pub fn run_all<I>(&self, cities: I) -> (SummaryQueue, ProducerHandle)
    where
        I: IntoIterator<Item = String>,
    {
        let cities: BTreeSet<String> = cities.into_iter().collect();
        let (sender, queue) = mpsc::unbounded_channel();
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        info!(
            "Processing {} cities with up to {} workers",
            cities.len(),
            self.workers
        );

        for city in cities.iter().cloned() {
            let sender = sender.clone();
            let source = Arc::clone(&self.source);
            let reducer = Arc::clone(&self.reducer);
            let permits = Arc::clone(&permits);
            let fetch_timeout = self.fetch_timeout;

            tasks.spawn(async move {
                // The semaphore is never closed, so this only waits for a free slot.
                let _permit = permits.acquire_owned().await;
                let outcome = process_city(source.as_ref(), reducer, &city, fetch_timeout).await;
                let outcome = outcome.and_then(|summary| {
                    sender.send(summary).map_err(|_| FailureKind::Undelivered)
                });
                (city, outcome)
            });
        }
        // Workers now hold the only senders; the queue closes when the last one finishes.
        drop(sender);

        let handle = tokio::spawn(supervise(tasks, cities));
        (queue, ProducerHandle { handle })
    }
}

async fn supervise(
    mut tasks: JoinSet<(String, Result<(), FailureKind>)>,
    mut pending: BTreeSet<String>,
) -> PoolReport {
    let mut report = PoolReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((city, Ok(()))) => {
                pending.remove(&city);
                report.completed.push(city);
            }
            Ok((city, Err(kind))) => {
                warn!("Excluding {}: {}", city, kind);
                pending.remove(&city);
                report.failures.push(CityFailure { city, kind });
            }
            Err(e) => error!("City worker task failed: {}", e),
        }
    }
    for city in pending {
        report.failures.push(CityFailure {
            city,
            kind: FailureKind::Aborted,
        });
    }
    info!(
        "All city workers finished: {} succeeded, {} failed",
        report.completed.len(),
        report.failures.len()
    );
    report
}

async fn process_city<S: ForecastSource>(
    source: &S,
    reducer: Arc<DayReducer>,
    city: &str,
    fetch_timeout: Option<Duration>,
) -> Result<CitySummary, FailureKind> {
    let raw = fetch_with_deadline(source, city, fetch_timeout).await?;

    // Reduction is CPU work; keep it off the async workers.
    let owned_city = city.to_string();
    let summary = tokio::task::spawn_blocking(move || reducer.reduce(&owned_city, &raw))
        .await
        .map_err(|source| ReduceError::TaskJoin {
            city: city.to_string(),
            source,
        })??;

    debug!(
        "Reduced {}: {} days, average temperature {:?}, average favorable hours {:?}",
        city,
        summary.daily_breakdown.len(),
        summary.average_temperature,
        summary.average_favorable_hours
    );
    Ok(summary)
}

async fn fetch_with_deadline<S: ForecastSource>(
    source: &S,
    city: &str,
    fetch_timeout: Option<Duration>,
) -> Result<RawForecast, FetchError> {
    info!("Getting data for city: {}", city);
    let raw = match fetch_timeout {
        Some(after) => tokio::time::timeout(after, source.fetch(city))
            .await
            .map_err(|_| FetchError::Timeout {
                city: city.to_string(),
                after,
            })??,
        None => source.fetch(city).await?,
    };
    info!("Finished getting data for city: {}", city);
    Ok(raw)
}
