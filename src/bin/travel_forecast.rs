use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use travel_forecast::{
    FileForecastSource, ForecastConfig, ForecastSource, HttpForecastSource, JsonResultSink,
    TravelForecastError, TravelForecaster,
};

/// Rank cities by daytime weather and recommend where to travel.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file. Built-in city catalogue is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the ranked result.
    #[arg(long, default_value = "data.json")]
    output: PathBuf,

    /// Read forecasts from saved JSON files in this directory instead of downloading them.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Maximum number of cities processed concurrently.
    #[arg(long)]
    workers: Option<usize>,

    /// Deadline for each city fetch, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), TravelForecastError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ForecastConfig::from_file(path).await?,
        None => ForecastConfig::default(),
    };
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if cli.timeout_secs.is_some() {
        config.fetch_timeout_secs = cli.timeout_secs;
    }

    match cli.data_dir.clone() {
        Some(dir) => {
            info!("Reading forecasts from {}", dir.display());
            let source = FileForecastSource::new(dir, config.cities.clone());
            run(config, source, &cli.output).await
        }
        None => {
            let source = HttpForecastSource::new(config.cities.clone());
            run(config, source, &cli.output).await
        }
    }
}

async fn run<S: ForecastSource>(
    config: ForecastConfig,
    source: S,
    output: &Path,
) -> Result<(), TravelForecastError> {
    let forecaster = TravelForecaster::builder()
        .config(config)
        .source(Arc::new(source))
        .build();
    let report = forecaster.run().await?;

    if !report.is_complete() {
        warn!(
            "{} cities were excluded: {}",
            report.failures.len(),
            report.excluded_cities().join(", ")
        );
    }
    JsonResultSink::write(output, &report.ranked).await?;
    println!("{}", report.recommendation);
    Ok(())
}
