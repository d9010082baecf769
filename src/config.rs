use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://finance.yahoo.com/quote";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("trendcast/", env!("CARGO_PKG_VERSION"));

/// Where the price history comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Scrape the history page online
    Live,
    /// Read a previously downloaded file
    File,
}

impl TryFrom<u8> for SourceMode {
    type Error = anyhow::Error;

    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            0 => Ok(SourceMode::Live),
            1 => Ok(SourceMode::File),
            other => anyhow::bail!("mode must be 0 (online) or 1 (read from CSV), got {}", other),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Live => write!(f, "live"),
            SourceMode::File => write!(f, "file"),
        }
    }
}

/// Settings for the price sources. Unset values fall back to the
/// `[source]` table of a settings file, then to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Args)]
pub struct SourceSettings {
    /// Directory holding downloaded <TICKER>.csv files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Quote page prefix; the ticker and history query are appended
    #[arg(long)]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with live requests
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl SourceSettings {
    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: SourceSettings) -> Self {
        Self {
            data_dir: self.data_dir.or(fallback.data_dir),
            base_url: self.base_url.or(fallback.base_url),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
            user_agent: self.user_agent.or(fallback.user_agent),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_deref().unwrap_or(Path::new("."))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

/// Contents of a TOML settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub source: SourceSettings,
}

impl SettingsFile {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: SettingsFile = toml::from_str(&content)?;
        Ok(settings)
    }
}

/// Command line for trendcast
#[derive(Debug, Clone, Parser)]
#[command(name = "trendcast")]
#[command(about = "Estimate a future stock price from the linear trend of its closing prices")]
pub struct Config {
    /// Ticker of the stock
    #[arg(value_name = "TICKER")]
    pub ticker: String,

    /// How many days past the latest close to predict
    #[arg(value_name = "DAYS", allow_negative_numbers = true)]
    pub days: i64,

    /// 0 = fetch online, 1 = read <TICKER>.csv from the data directory
    #[arg(value_name = "MODE")]
    pub mode: u8,

    /// Read this price file instead of <data_dir>/<TICKER>.csv (mode 1)
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceSettings,

    /// TOML settings file with a [source] table
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report of the fit and prediction to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log debug output, including the fitted line
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Merge in the settings file named by `--config`, if any.
    pub fn with_settings_file(mut self) -> Result<Self> {
        if let Some(path) = &self.config {
            debug!("loading settings from {}", path.display());
            let file = SettingsFile::from_file(path)
                .with_context(|| format!("cannot load settings {}", path.display()))?;
            self.source = self.source.or(file.source);
        }
        Ok(self)
    }

    /// Validate configuration parameters
    ///
    /// A negative `days` is not rejected here; the predictor reports it.
    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            warn!("rejecting configuration: empty ticker");
            anyhow::bail!("ticker must not be empty");
        }

        if let Err(err) = SourceMode::try_from(self.mode) {
            warn!(mode = self.mode, "rejecting configuration: unknown source mode");
            return Err(err);
        }

        if self.source.timeout_secs == Some(0) {
            warn!("rejecting configuration: zero timeout");
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        if self.file.is_some() && self.mode != 1 {
            warn!(mode = self.mode, "rejecting configuration: --file outside file mode");
            anyhow::bail!("--file is only used with mode 1");
        }

        Ok(())
    }

    pub fn source_mode(&self) -> Result<SourceMode> {
        SourceMode::try_from(self.mode)
    }

    /// Local file read in file mode.
    pub fn price_file(&self) -> PathBuf {
        match &self.file {
            Some(path) => path.clone(),
            None => self.source.data_dir().join(format!("{}.csv", self.ticker)),
        }
    }
}
