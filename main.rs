use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trendcast::{Config, PredictionReport, forecast, load_prices};

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(format!("trendcast={level}").parse()?)
                .add_directive(format!("market_io={level}").parse()?),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.verbose)?;

    let config = config.with_settings_file()?;
    config.validate()?;
    let mode = config.source_mode()?;
    info!("predicting {} {} days ahead from {} source", config.ticker, config.days, mode);

    let history = load_prices(&config).await?;
    let prediction = forecast(&history, config.days)?;

    println!(
        "The price {} days from now should be about: ${:.2}",
        config.days, prediction.value
    );

    if let Some(path) = &config.output {
        PredictionReport::new(&config.ticker, mode, history.len(), &prediction).write(path)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}
