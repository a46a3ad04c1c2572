use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::constants::{DEFAULT_INTERVAL_SECS, DEFAULT_VOLUME_WINDOW_MINUTES};
use crate::domain::enums::BandGranularity;
use crate::infrastructure::exchange::ExchangeEndpoints;

/// Top-level configuration structure containing all config sections
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub kafka: KafkaConfig,
    pub topics: TopicsConfig,
    pub app: AppInfo,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub exchanges: ExchangeEndpoints,

    #[serde(default)]
    pub aave: AaveJobConfig,

    #[serde(default)]
    pub eth: EthJobConfig,
}

/// Kafka connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaConfig {
    pub bootstrap_servers: String,
    pub bootstrap_servers_internal: String,
    pub schema_registry_url: String,
    pub schema_registry_url_internal: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5000
}

/// Kafka topics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TopicsConfig {
    pub liquidity: String,
    pub base_name: String,
}

/// Application information
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    pub rust_running_in_docker: bool,

    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,
}

fn default_schema_dir() -> String {
    "./schemas".to_string()
}

/// When the jobs run
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Run every enabled job once and exit
    #[serde(default)]
    pub run_once: bool,
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            run_once: false,
        }
    }
}

/// AAVE order book sampling across three venues
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AaveJobConfig {
    pub enabled: bool,
    pub binance_symbol: String,
    pub okx_symbol: String,
    pub bybit_symbol: String,
    pub granularity: BandGranularity,
    pub binance_limit: u32,
    pub okx_limit: u32,
    pub bybit_limit: u32,
}

impl Default for AaveJobConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            binance_symbol: "AAVEUSDT".to_string(),
            okx_symbol: "AAVE-USDT".to_string(),
            bybit_symbol: "AAVEUSDT".to_string(),
            granularity: BandGranularity::Wide,
            binance_limit: 2000,
            okx_limit: 400,
            bybit_limit: 500,
        }
    }
}

/// ETH order books on Binance, split by quote asset
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EthJobConfig {
    pub enabled: bool,
    pub usdt_symbol: String,
    pub usdc_symbol: String,
    pub btc_symbol: String,
    /// Ticker used to convert BTC-quoted values to USD
    pub btc_usd_symbol: String,
    pub granularity: BandGranularity,
    pub depth_limit: u32,
    pub volume_window_minutes: u64,
}

impl Default for EthJobConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            usdt_symbol: "ETHUSDT".to_string(),
            usdc_symbol: "ETHUSDC".to_string(),
            btc_symbol: "ETHBTC".to_string(),
            btc_usd_symbol: "BTCUSDT".to_string(),
            granularity: BandGranularity::Narrow,
            depth_limit: 2000,
            volume_window_minutes: DEFAULT_VOLUME_WINDOW_MINUTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        info!("Loaded configuration from {}", path.display());
        debug!("Running in Docker: {}", config.app.rust_running_in_docker);

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(config_str)?;
        if config.schedule.interval_secs == 0 {
            return Err(anyhow!("schedule.interval_secs must be greater than zero"));
        }
        Ok(config)
    }

    /// Helper to get the appropriate Kafka bootstrap servers URL based on Docker status
    pub fn kafka_bootstrap_servers(&self) -> &str {
        if self.app.rust_running_in_docker {
            &self.kafka.bootstrap_servers_internal
        } else {
            &self.kafka.bootstrap_servers
        }
    }

    /// Helper to get the appropriate Schema Registry URL based on Docker status
    pub fn kafka_schema_registry_url(&self) -> &str {
        if self.app.rust_running_in_docker {
            &self.kafka.schema_registry_url_internal
        } else {
            &self.kafka.schema_registry_url
        }
    }
}
