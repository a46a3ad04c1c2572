use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use log::{debug, error, info};

use crate::aggregation::{merge_books, BandSchemas};
use crate::config_loader::EthJobConfig;
use crate::domain::constants::DATASET_ETH;
use crate::domain::enums::{Exchange, QuoteAsset};
use crate::domain::model::book::SourceLiquidity;
use crate::domain::model::liquidity_row::LiquidityRow;
use crate::domain::traits::RowSink;
use crate::infrastructure::exchange::ExchangeClient;
use crate::jobs::rows::{build_rows, format_timestamp, RowContext};

/// Recent traded volume per quote asset, in that asset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EthVolumes {
    /// USDT + USDC volume
    pub usd: f64,
    pub btc: f64,
}

/// Everything one ETH run fetches. `None` marks a failed fetch.
#[derive(Clone, Debug, Default)]
pub struct EthInputs {
    pub usdt: Option<SourceLiquidity>,
    pub usdc: Option<SourceLiquidity>,
    pub btc: Option<SourceLiquidity>,
    pub btc_usd_price: Option<f64>,
    pub volumes: Option<EthVolumes>,
}

/// Complete ETH liquidity, ready to publish
#[derive(Clone, Debug)]
pub struct EthLiquidity {
    /// USDT and USDC books merged under the USDT reference price
    pub usd: SourceLiquidity,
    pub btc: SourceLiquidity,
    pub btc_usd_price: f64,
    pub volumes: EthVolumes,
}

impl EthLiquidity {
    pub fn btc_volume_in_usd(&self) -> f64 {
        self.volumes.btc * self.btc_usd_price
    }
}

impl EthInputs {
    /// Merges the stablecoin books once every input is present.
    ///
    /// Returns None if anything is missing, including a stablecoin side with
    /// no bands to merge.
    pub fn complete(&self, schemas: &BandSchemas) -> Option<EthLiquidity> {
        let btc = self.btc.clone()?;
        let btc_usd_price = self.btc_usd_price.filter(|p| p.is_finite() && *p > 0.0)?;
        let volumes = self.volumes?;

        let usd = match merge_books(QuoteAsset::Usd.as_str(), &[self.usdt.as_ref(), self.usdc.as_ref()], schemas) {
            Ok(usd) => usd,
            Err(e) => {
                error!("USD merge failed: {}", e);
                return None;
            }
        };

        Some(EthLiquidity { usd, btc, btc_usd_price, volumes })
    }
}

/// Samples ETH liquidity on Binance against USDT, USDC and BTC
pub struct EthLiquidityJob<'a> {
    client: &'a ExchangeClient,
    config: &'a EthJobConfig,
    schemas: BandSchemas,
}

impl<'a> EthLiquidityJob<'a> {
    pub fn new(client: &'a ExchangeClient, config: &'a EthJobConfig) -> Self {
        Self {
            client,
            config,
            schemas: BandSchemas::for_granularity(config.granularity),
        }
    }

    /// Fetches books, the BTC price and volumes concurrently
    pub async fn fetch(&self) -> EthInputs {
        let cfg = self.config;
        let (usdt, usdc, btc, btc_usd_price, volumes) = tokio::join!(
            self.fetch_book(&cfg.usdt_symbol, "USDT"),
            self.fetch_book(&cfg.usdc_symbol, "USDC"),
            self.fetch_book(&cfg.btc_symbol, QuoteAsset::Btc.as_str()),
            self.fetch_price(&cfg.btc_usd_symbol),
            self.fetch_volumes(),
        );

        EthInputs { usdt, usdc, btc, btc_usd_price, volumes }
    }

    async fn fetch_book(&self, symbol: &str, source: &str) -> Option<SourceLiquidity> {
        self.client
            .source_liquidity(Exchange::Binance, symbol, self.config.depth_limit, source, &self.schemas)
            .await
            .map_err(|e| error!("Binance API error for {}: {:#}", symbol, e))
            .ok()
    }

    async fn fetch_price(&self, symbol: &str) -> Option<f64> {
        self.client.binance_price(symbol).await
            .map_err(|e| error!("Error fetching {} price: {:#}", symbol, e))
            .ok()
    }

    async fn fetch_volume(&self, symbol: &str) -> Option<f64> {
        self.client.binance_recent_volume(symbol, self.config.volume_window_minutes).await
            .map_err(|e| error!("Error fetching {} volume: {:#}", symbol, e))
            .ok()
    }

    async fn fetch_volumes(&self) -> Option<EthVolumes> {
        let cfg = self.config;
        let (usdt, usdc, btc) = tokio::join!(
            self.fetch_volume(&cfg.usdt_symbol),
            self.fetch_volume(&cfg.usdc_symbol),
            self.fetch_volume(&cfg.btc_symbol),
        );
        let volumes = EthVolumes { usd: usdt? + usdc?, btc: btc? };
        debug!("ETH volumes over {} min: {:?}", cfg.volume_window_minutes, volumes);
        Some(volumes)
    }

    pub fn rows(&self, liquidity: &EthLiquidity, timestamp: &str) -> Vec<LiquidityRow> {
        eth_rows(liquidity, &self.schemas, timestamp)
    }

    pub async fn run<S: RowSink>(&self, sink: &S) -> Result<()> {
        info!("ETH liquidity job started");
        let start = Instant::now();

        let inputs = self.fetch().await;
        let Some(liquidity) = inputs.complete(&self.schemas) else {
            error!("Failed to fetch complete liquidity data");
            return Ok(());
        };

        let rows = self.rows(&liquidity, &format_timestamp(Utc::now()));

        let publish_start = Instant::now();
        sink.publish_rows(&rows).await?;
        info!("ETH publish time: {:.3} seconds", publish_start.elapsed().as_secs_f64());

        info!("ETH total execution time: {:.3} seconds", start.elapsed().as_secs_f64());
        info!("ETH liquidity data published ({} rows)", rows.len());
        Ok(())
    }
}

/// USD rows first, then BTC rows with values and volume converted to USD
pub fn eth_rows(liquidity: &EthLiquidity, schemas: &BandSchemas, timestamp: &str) -> Vec<LiquidityRow> {
    let usd_ctx = RowContext {
        dataset: DATASET_ETH,
        timestamp,
        usd_rate: 1.0,
        volume_usd: Some(liquidity.volumes.usd),
    };
    let btc_ctx = RowContext {
        dataset: DATASET_ETH,
        timestamp,
        usd_rate: liquidity.btc_usd_price,
        volume_usd: Some(liquidity.btc_volume_in_usd()),
    };

    let mut rows = build_rows(&liquidity.usd, schemas, &usd_ctx);
    rows.extend(build_rows(&liquidity.btc, schemas, &btc_ctx));
    rows
}
