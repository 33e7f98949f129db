//! Tickerscope - a terminal explorer for stock ticker reference data.

use anyhow::Context;
use tickerscope::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a file, the terminal belongs to the UI
    let log_dir = tickerscope::config::log_dir().context("resolving log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "tickerscope.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickerscope=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default().context("loading configuration")?;

    // Run the application
    let mut app = App::new(config).context("starting terminal")?;
    app.run().await?;

    Ok(())
}
