// Standard library imports
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

// External crate imports
use anyhow::Result;
use dotenv::dotenv;
use log::{info, warn};
use tokio::select;
use tokio::time::{interval, Duration, MissedTickBehavior};

// Internal crate imports
use liquidity_bands::config_loader::AppConfig;
use liquidity_bands::infrastructure::exchange::ExchangeClient;
use liquidity_bands::infrastructure::kafka::{KafkaProducer, LIQUIDITY_TOPIC_TYPE};
use liquidity_bands::jobs::run_enabled_jobs;

/// Timeout applied to every exchange REST request
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Logger initialized");

    // Load configuration from TOML file (first try the parent directory, then the working directory)
    let config_path = Path::new("../config.toml");
    let config = match AppConfig::from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config from {}: {}", config_path.display(), e);

            let alt_path = Path::new("./config.toml");
            info!("Attempting to load from alternate path: {}", alt_path.display());
            AppConfig::from_file(alt_path)?
        }
    };

    let config = Arc::new(config);
    info!("Configuration loaded, running in docker: {}", config.app.rust_running_in_docker);

    run_collector(config).await
}

/// Builds the clients once and runs the jobs on a fixed interval
async fn run_collector(config: Arc<AppConfig>) -> Result<()> {
    let client = ExchangeClient::new(config.exchanges.clone(), HTTP_TIMEOUT)?;

    let mut topics = HashMap::new();
    topics.insert(LIQUIDITY_TOPIC_TYPE.to_string(), config.topics.liquidity.clone());

    let producer = KafkaProducer::new(
        config.kafka_bootstrap_servers(),
        config.kafka_schema_registry_url(),
        topics,
        &config.app.schema_dir,
        config.kafka.timeout_ms,
    ).await?;

    if config.schedule.run_once {
        info!("Running jobs once");
        run_enabled_jobs(&client, &config, &producer).await;
        return Ok(());
    }

    // Set up signal handler for SIGINT (Ctrl+C)
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    let mut ticker = interval(Duration::from_secs(config.schedule.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!("Collecting liquidity every {} seconds", config.schedule.interval_secs);

    loop {
        select! {
            _ = ticker.tick() => {
                run_enabled_jobs(&client, &config, &producer).await;
            }
            _ = sigint.recv() => {
                warn!("SIGINT (Ctrl+C) received. Shutting down...");
                break;
            }
        }
    }

    info!("Exiting program");
    Ok(())
}
