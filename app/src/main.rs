mod args;

use anyhow::Context;
use args::Args;
use clap::Parser;
use log::info;
use pgwh::{PostgresConnector, Supervisor, Timings, WebhookClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_bridge_config();
    let timings = Timings::default();

    info!("Starting pgsql-webhook");
    info!("Webhook URL: {}", config.webhook_url);
    info!("Channel: {}", config.channel);

    let connector = PostgresConnector::new(&config.database_url)
        .context("invalid database configuration")?;
    let client = WebhookClient::new(config.webhook_url.clone(), timings.delivery_timeout)
        .context("failed to build webhook client")?;
    let supervisor = Supervisor::new(connector, client, config, timings);

    tokio::select! {
        _ = supervisor.run() => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
            info!("Shutdown signal received, exiting");
        }
    }

    Ok(())
}
