use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statuswatch::api::StatusClient;
use statuswatch::config::Config;
use statuswatch::notifier::TelegramNotifier;
use statuswatch::watcher::Watcher;

#[derive(Parser)]
#[command(
    name = "statuswatch",
    version,
    about = "Telegram bot that watches homework review statuses",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Override the poll interval in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Run a single poll cycle and exit (smoke test for credentials)
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the variables directly
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Some(interval) = cli.interval {
        config.poll_interval_secs = interval;
        config.validate()?;
    }

    tracing::info!(
        endpoint = %config.endpoint,
        interval_secs = config.poll_interval_secs,
        "statuswatch starting"
    );

    let client = StatusClient::new(
        &config.endpoint,
        &config.practicum_token,
        config.request_timeout(),
    )?;
    let notifier = TelegramNotifier::new(
        &config.telegram_token,
        &config.telegram_chat_id,
        config.request_timeout(),
    )?;

    let mut watcher = Watcher::new(client, notifier, config.poll_interval());

    if cli.once {
        let outcome = watcher.run_once().await;
        tracing::info!(?outcome, "single cycle finished");
        return Ok(());
    }

    watcher.run().await;
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("statuswatch=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("statuswatch=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}
