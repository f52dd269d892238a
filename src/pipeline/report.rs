use crate::forecast::error::FetchError;
use crate::reduce::error::ReduceError;
use thiserror::Error;

/// Why a city is missing from the ranked output.
#[derive(Debug, Error)]
pub enum FailureKind {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error("Summary queue closed before the result was delivered")]
    Undelivered,

    #[error("Worker task stopped before reporting a result")]
    Aborted,
}

/// One excluded city and the reason.
#[derive(Debug, Error)]
#[error("{city}: {kind}")]
pub struct CityFailure {
    pub city: String,
    #[source]
    pub kind: FailureKind,
}

/// Outcome of a [`CityWorkerPool`](crate::CityWorkerPool) run, available once every
/// worker has finished.
#[derive(Debug, Default)]
pub struct PoolReport {
    /// Cities whose summary was pushed onto the queue, in completion order.
    pub completed: Vec<String>,
    pub failures: Vec<CityFailure>,
}

impl PoolReport {
    pub fn failed_cities(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.city.as_str()).collect()
    }
}
