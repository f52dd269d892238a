use chrono::NaiveDate;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use travel_forecast::{
    Day, FailureKind, FetchError, FileForecastSource, ForecastConfig, ForecastSource,
    HourSample, JsonResultSink, RawForecast, Recommendation, TravelForecastError,
    TravelForecaster,
};

/// In-memory source; each city can be given its own latency.
struct FakeSource {
    forecasts: HashMap<String, (RawForecast, Duration)>,
}

impl ForecastSource for FakeSource {
    async fn fetch(&self, city: &str) -> Result<RawForecast, FetchError> {
        let (forecast, delay) = self
            .forecasts
            .get(city)
            .cloned()
            .ok_or_else(|| FetchError::UnknownCity(city.to_string()))?;
        tokio::time::sleep(delay).await;
        Ok(forecast)
    }
}

fn day(d: u32, hours: Vec<HourSample>) -> Day {
    Day {
        date: NaiveDate::from_ymd_opt(2022, 5, d).unwrap(),
        hours,
    }
}

fn uniform(temp: i64, favorable_hours: u32) -> RawForecast {
    let hours = (9..=19)
        .map(|h| {
            let condition = if h - 9 < favorable_hours { "clear" } else { "rain" };
            HourSample::new(h, temp, condition)
        })
        .collect();
    RawForecast {
        forecasts: vec![day(26, hours), day(27, vec![HourSample::new(3, temp, "clear")])],
    }
}

fn config(cities: &[&str]) -> ForecastConfig {
    ForecastConfig {
        cities: cities
            .iter()
            .map(|c| (c.to_string(), format!("{}.json", c.to_lowercase())))
            .collect(),
        workers: 2,
        ..ForecastConfig::default()
    }
}

#[tokio::test]
async fn test_absent_temperature_ranks_last() -> Result<(), TravelForecastError> {
    let mut no_temps = uniform(0, 11);
    for hour in &mut no_temps.forecasts[0].hours {
        hour.temp = None;
    }

    let source = FakeSource {
        forecasts: HashMap::from([
            ("ROMA".to_string(), (uniform(24, 3), Duration::from_millis(30))),
            ("OSLO".to_string(), (uniform(12, 5), Duration::from_millis(5))),
            ("FOGGY".to_string(), (no_temps, Duration::ZERO)),
        ]),
    };

    let report = TravelForecaster::builder()
        .config(config(&["ROMA", "OSLO", "FOGGY"]))
        .source(Arc::new(source))
        .build()
        .run()
        .await?;

    let order: Vec<_> = report.ranked.iter().map(|s| s.city.as_str()).collect();
    assert_eq!(order, vec!["ROMA", "OSLO", "FOGGY"]);
    assert_eq!(report.ranked[2].average_temperature, None);
    assert_eq!(report.ranked[2].average_favorable_hours, Some(11.0));
    assert!(report.ranked[0].rank < report.ranked[1].rank);
    assert!(report.ranked[1].rank < report.ranked[2].rank);
    assert_eq!(report.recommendation, Recommendation::Single("ROMA".into()));
    assert!(report.is_complete());
    Ok(())
}

#[tokio::test]
async fn test_one_failed_fetch_is_reported() -> Result<(), TravelForecastError> {
    let source = FakeSource {
        forecasts: HashMap::from([
            ("ROMA".to_string(), (uniform(24, 3), Duration::from_millis(10))),
            ("OSLO".to_string(), (uniform(12, 5), Duration::ZERO)),
            ("CAIRO".to_string(), (uniform(30, 11), Duration::from_millis(5))),
        ]),
    };

    let report = TravelForecaster::builder()
        .config(config(&["ROMA", "OSLO", "CAIRO", "ATLANTIS"]))
        .source(Arc::new(source))
        .build()
        .run()
        .await?;

    assert_eq!(report.ranked.len(), 3);
    assert_eq!(report.excluded_cities(), vec!["ATLANTIS"]);
    assert!(matches!(
        report.failures[0].kind,
        FailureKind::Fetch(FetchError::UnknownCity(_))
    ));
    assert_eq!(report.recommendation, Recommendation::Single("CAIRO".into()));
    Ok(())
}

#[tokio::test]
async fn test_identical_cities_are_recommended_together() -> Result<(), TravelForecastError> {
    let source = FakeSource {
        forecasts: HashMap::from([
            ("LISBON".to_string(), (uniform(22, 8), Duration::from_millis(15))),
            ("PORTO".to_string(), (uniform(22, 8), Duration::ZERO)),
            ("OSLO".to_string(), (uniform(12, 11), Duration::ZERO)),
        ]),
    };

    let report = TravelForecaster::builder()
        .config(config(&["LISBON", "PORTO", "OSLO"]))
        .source(Arc::new(source))
        .build()
        .run()
        .await?;

    assert_eq!(report.ranked[0].rank, report.ranked[1].rank);
    let mut top = report.recommendation.cities();
    top.sort();
    assert_eq!(top, vec!["LISBON", "PORTO"]);
    Ok(())
}

#[tokio::test]
async fn test_empty_config_is_rejected() {
    let source = FakeSource {
        forecasts: HashMap::new(),
    };
    let result = TravelForecaster::builder()
        .config(ForecastConfig {
            cities: BTreeMap::new(),
            ..ForecastConfig::default()
        })
        .source(Arc::new(source))
        .build()
        .run()
        .await;
    assert!(matches!(result, Err(TravelForecastError::Config(_))));
}

#[tokio::test]
async fn test_files_to_json_result() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let payload = |temp: i64, condition: &str| {
        json!({
            "forecasts": [{
                "date": "2022-05-26",
                "hours": [
                    { "hour": "8", "temp": 40, "condition": "clear" },
                    { "hour": "9", "temp": temp, "condition": condition },
                    { "hour": "19", "temp": temp + 2, "condition": condition }
                ]
            }]
        })
    };
    std::fs::write(
        dir.path().join("berlin.json"),
        serde_json::to_vec(&payload(18, "cloudy"))?,
    )?;
    std::fs::write(
        dir.path().join("london.json"),
        serde_json::to_vec(&payload(14, "rain"))?,
    )?;

    let config = config(&["BERLIN", "LONDON"]);
    let source = FileForecastSource::new(dir.path(), config.cities.clone());
    let report = TravelForecaster::builder()
        .config(config)
        .source(Arc::new(source))
        .build()
        .run()
        .await?;

    let output = dir.path().join("data.json");
    JsonResultSink::write(&output, &report.ranked).await?;
    let written: Value = serde_json::from_slice(&std::fs::read(&output)?)?;

    assert_eq!(written["forecasting"][0]["city"], json!("BERLIN"));
    assert_eq!(written["forecasting"][0]["average_temp"], json!(19.0));
    assert_eq!(written["forecasting"][0]["average_not_rainy_hours"], json!(2.0));
    assert_eq!(
        written["forecasting"][0]["date_data"][0]["not_rainy_hours"],
        json!(2)
    );
    assert_eq!(written["forecasting"][1]["city"], json!("LONDON"));
    assert_eq!(written["forecasting"][1]["average_not_rainy_hours"], json!(0.0));
    assert_eq!(written["forecasting"][1]["rating"], json!(4));
    Ok(())
}
