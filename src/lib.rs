pub mod config;
pub mod report;
pub mod scrape;

pub use config::{Config, SettingsFile, SourceMode, SourceSettings};
pub use report::PredictionReport;
pub use scrape::{HistoryClient, ScrapeError, parse_history_table};

// Re-export the core and file sources
pub use market_io::{PriceHistory, SourceError, load_history};
pub use trend::{LinearModel, Orientation, Prediction, Predictor, SampleSeries, TrendError};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Fetch or read the price history selected by `config`.
pub async fn load_prices(config: &Config) -> Result<PriceHistory> {
    match config.source_mode()? {
        SourceMode::Live => {
            let client = HistoryClient::new(&config.source)?;
            client
                .fetch_history(&config.ticker)
                .await
                .with_context(|| format!("failed to fetch price history for {}", config.ticker))
        }
        SourceMode::File => {
            let path = config.price_file();
            load_history(&path)
                .with_context(|| format!("failed to load price history from {}", path.display()))
        }
    }
}

/// Fit the history and extrapolate `days` past its most recent close.
pub fn forecast(history: &PriceHistory, days: i64) -> Result<Prediction> {
    let series = history
        .to_series()
        .context("price history rejected")?;
    info!("fitting {} closes", series.len());

    let predictor = Predictor::new(&series)?;
    let model = predictor.model();
    debug!(slope = model.slope(), intercept = model.intercept(), "fitted trend line");

    Ok(predictor.forecast(days)?)
}
