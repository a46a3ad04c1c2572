use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use log::{error, info, warn};

use crate::aggregation::BandSchemas;
use crate::config_loader::AaveJobConfig;
use crate::domain::constants::DATASET_AAVE;
use crate::domain::enums::Exchange;
use crate::domain::model::book::SourceLiquidity;
use crate::domain::model::liquidity_row::LiquidityRow;
use crate::domain::traits::RowSink;
use crate::infrastructure::exchange::ExchangeClient;
use crate::jobs::rows::{build_rows, format_timestamp, RowContext};

/// Samples the AAVE/USDT book on Binance, OKX and Bybit
pub struct AaveLiquidityJob<'a> {
    client: &'a ExchangeClient,
    config: &'a AaveJobConfig,
    schemas: BandSchemas,
}

impl<'a> AaveLiquidityJob<'a> {
    pub fn new(client: &'a ExchangeClient, config: &'a AaveJobConfig) -> Self {
        Self {
            client,
            config,
            schemas: BandSchemas::for_granularity(config.granularity),
        }
    }

    /// Fetches all three venues concurrently and keeps the ones that answered
    pub async fn fetch(&self) -> Vec<SourceLiquidity> {
        let cfg = self.config;
        let (binance, okx, bybit) = tokio::join!(
            self.fetch_one(Exchange::Binance, &cfg.binance_symbol, cfg.binance_limit),
            self.fetch_one(Exchange::Okx, &cfg.okx_symbol, cfg.okx_limit),
            self.fetch_one(Exchange::Bybit, &cfg.bybit_symbol, cfg.bybit_limit),
        );

        let results: Vec<SourceLiquidity> = [binance, okx, bybit].into_iter().flatten().collect();
        if results.len() < 3 {
            warn!("AAVE liquidity: only {} of 3 exchanges returned data", results.len());
        }
        results
    }

    async fn fetch_one(&self, exchange: Exchange, symbol: &str, limit: u32) -> Option<SourceLiquidity> {
        match self.client.source_liquidity(exchange, symbol, limit, exchange.as_str(), &self.schemas).await {
            Ok(liquidity) => Some(liquidity),
            Err(e) => {
                error!("{} API error: {:#}", exchange, e);
                None
            }
        }
    }

    /// One row per band of every exchange, values already in USD(T)
    pub fn rows(&self, sources: &[SourceLiquidity], timestamp: &str) -> Vec<LiquidityRow> {
        aave_rows(sources, &self.schemas, timestamp)
    }

    pub async fn run<S: RowSink>(&self, sink: &S) -> Result<()> {
        info!("AAVE liquidity job started");
        let start = Instant::now();

        let sources = self.fetch().await;
        let rows = self.rows(&sources, &format_timestamp(Utc::now()));

        let publish_start = Instant::now();
        sink.publish_rows(&rows).await?;
        info!("AAVE publish time: {:.3} seconds", publish_start.elapsed().as_secs_f64());

        info!("AAVE total execution time: {:.3} seconds", start.elapsed().as_secs_f64());
        info!("AAVE liquidity data published ({} rows from {} exchanges)", rows.len(), sources.len());
        Ok(())
    }
}

pub fn aave_rows(sources: &[SourceLiquidity], schemas: &BandSchemas, timestamp: &str) -> Vec<LiquidityRow> {
    let ctx = RowContext {
        dataset: DATASET_AAVE,
        timestamp,
        usd_rate: 1.0,
        volume_usd: None,
    };
    sources.iter()
        .flat_map(|source| build_rows(source, schemas, &ctx))
        .collect()
}
