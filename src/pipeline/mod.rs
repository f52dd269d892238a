pub mod collector;
pub mod report;
pub mod worker_pool;

pub use collector::drain;
pub use report::{CityFailure, FailureKind, PoolReport};
pub use worker_pool::{CityWorkerPool, ProducerHandle, SummaryQueue};
