use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio::sync::watch;

use yc_autostart::api::CloudApiClient;
use yc_autostart::cli::Cli;
use yc_autostart::commands::setup::setup_command;
use yc_autostart::config::Config;
use yc_autostart::monitor::InstanceMonitor;
use yc_autostart::ui::ConsolePrompter;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let prompter = ConsolePrompter;

    if cli.setup {
        return setup_command(&prompter).await;
    }

    let config = match Config::load()? {
        Some(config) => config,
        None => {
            println!("No configuration found, running first-time setup.\n");
            setup_command(&prompter).await?;
            Config::load()?.context("Setup finished without saving a configuration")?
        }
    };

    let mut client = CloudApiClient::new(config.oauth_token.clone());
    client
        .authenticate()
        .await
        .context("Initial authentication failed")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    info!(
        "Watching instance '{}' ({})",
        config.instance_name, config.instance_id
    );
    let mut monitor = InstanceMonitor::new(client, config.instance_id, config.check_interval);
    monitor.run(shutdown_rx).await;

    info!("Monitoring stopped");
    Ok(())
}
