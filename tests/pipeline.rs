use std::fs;

use clap::Parser;
use tempfile::tempdir;
use trendcast::{Config, PredictionReport, TrendError, forecast, load_prices};

const CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-01,9.0,11.0,9.0,10.0,10.0,100
2024-01-02,11.0,13.0,11.0,12.0,12.0,100
2024-01-03,11.5,12.0,10.5,11.0,11.0,100
2024-01-04,14.0,16.0,14.0,15.0,15.0,100
2024-01-05,14.5,15.0,13.5,14.0,14.0,100
";

fn config(args: &[&str]) -> Config {
    Config::try_parse_from(std::iter::once("trendcast").chain(args.iter().copied())).unwrap()
}

#[tokio::test]
async fn test_csv_mode_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ACME.csv"), CSV).unwrap();
    let data_dir = dir.path().to_str().unwrap();

    let config = config(&["ACME", "3", "1", "--data-dir", data_dir]);
    config.validate().unwrap();

    let history = load_prices(&config).await.unwrap();
    let prediction = forecast(&history, config.days).unwrap();

    // slope 1.1, intercept 10.2, evaluated at x = 4 + 3
    assert!((prediction.model.slope() - 1.1).abs() < 1e-9);
    assert!((prediction.model.intercept() - 10.2).abs() < 1e-9);
    assert!((prediction.value - 17.9).abs() < 1e-9);
}

#[tokio::test]
async fn test_market_file_override_and_report() {
    let dir = tempdir().unwrap();
    let prices = dir.path().join("acme.txt");
    fs::write(&prices, "20240101 10\n20240102 12\n20240103 14\n20240104 16\n20240105 18\n").unwrap();
    let report_path = dir.path().join("reports/acme.json");

    let config = config(&[
        "ACME",
        "5",
        "1",
        "--file",
        prices.to_str().unwrap(),
        "--output",
        report_path.to_str().unwrap(),
    ]);
    config.validate().unwrap();

    let history = load_prices(&config).await.unwrap();
    let prediction = forecast(&history, config.days).unwrap();
    assert!((prediction.value - 28.0).abs() < 1e-9);

    PredictionReport::new(&config.ticker, config.source_mode().unwrap(), history.len(), &prediction)
        .write(&report_path)
        .unwrap();
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["samples"], 5);
    assert!((report["x"].as_f64().unwrap() - 9.0).abs() < 1e-12);
}

#[tokio::test]
async fn test_missing_csv_is_an_adapter_error() {
    let dir = tempdir().unwrap();
    let config = config(&["NOPE", "1", "1", "--data-dir", dir.path().to_str().unwrap()]);

    let err = load_prices(&config).await.unwrap_err();
    assert!(err.downcast_ref::<trendcast::SourceError>().is_some());
}

#[tokio::test]
async fn test_single_row_csv_is_insufficient() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ONE.csv"), "Date,Close\n2024-01-01,10.0\n").unwrap();
    let config = config(&["ONE", "1", "1", "--data-dir", dir.path().to_str().unwrap()]);

    let history = load_prices(&config).await.unwrap();
    let err = forecast(&history, 1).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TrendError>(),
        Some(&TrendError::InsufficientData { len: 1 })
    );
}
