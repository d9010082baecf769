//! Live price history scraped from a quote site's daily history page.
//!
//! The page's first table lists one trading day per row, most recent first,
//! with the closing price in the fifth column. Below the last price row the
//! site places non-price rows (dividend notes, a footer), so the walk stops at
//! the first row whose close cell is not a number.

use std::sync::LazyLock;
use std::time::Duration;

use market_io::PriceHistory;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};
use trend::Orientation;

use crate::config::SourceSettings;

/// Zero-based column of the closing price in the history table.
pub const CLOSE_CELL: usize = 4;

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b[^>]*>(.*?)</table>").unwrap());
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no price table found at {0}")]
    NoTable(String),
}

pub struct HistoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new(settings: &SourceSettings) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs()))
            .user_agent(settings.user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url().trim_end_matches('/').to_string(),
        })
    }

    pub fn history_url(&self, ticker: &str) -> String {
        format!(
            "{}/{}/history?&interval=1d&filter=history&frequency=1d",
            self.base_url, ticker
        )
    }

    /// Download the daily history page for `ticker` and extract its closes.
    pub async fn fetch_history(&self, ticker: &str) -> Result<PriceHistory, ScrapeError> {
        let url = self.history_url(ticker);
        info!("fetching {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!("received {} bytes", body.len());

        let closes = parse_history_table(&body).ok_or(ScrapeError::NoTable(url))?;
        info!("scraped {} closes for {}", closes.len(), ticker);

        Ok(PriceHistory::new(closes, Orientation::NewestFirst))
    }
}

/// Closing prices from the first table in `html`, in table order.
///
/// Returns `None` when the page has no table. The header row is skipped and
/// the walk ends at the first row without a numeric close cell, or at the
/// end of the table.
pub fn parse_history_table(html: &str) -> Option<Vec<f64>> {
    let table = TABLE_RE.captures(html)?.get(1)?.as_str();

    let closes = ROW_RE
        .captures_iter(table)
        .skip(1)
        .map_while(|row| {
            let cell = CELL_RE.captures_iter(&row[1]).nth(CLOSE_CELL)?;
            parse_price(&cell[1])
        })
        .collect();

    Some(closes)
}

fn parse_price(cell: &str) -> Option<f64> {
    let text = TAG_RE.replace_all(cell, "");
    let text = text.trim().replace(',', "");
    let price = text.parse::<f64>().ok()?;
    price.is_finite().then_some(price)
}
