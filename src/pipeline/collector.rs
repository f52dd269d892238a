//! The single consumer of the summary queue.

use crate::pipeline::worker_pool::SummaryQueue;
use crate::types::summary::CitySummary;
use log::{debug, info};

/// Drains the queue until the producer side has finished.
///
/// Waits whenever the queue is momentarily empty and only returns after every sender has
/// been dropped and all buffered summaries were taken. The result is in arrival order.
pub async fn drain(mut queue: SummaryQueue) -> Vec<CitySummary> {
    let mut collected = Vec::new();
    while let Some(summary) = queue.recv().await {
        debug!("Collected summary for {}", summary.city);
        collected.push(summary);
    }
    info!(
        "Data aggregation is completed, {} cities collected",
        collected.len()
    );
    collected
}
