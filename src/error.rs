use crate::config::ConfigError;
use crate::sink::SinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TravelForecastError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Producer stage failed to complete")]
    ProducerJoin(#[source] tokio::task::JoinError),
}
