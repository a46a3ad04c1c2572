pub mod aave;
pub mod eth;
pub mod rows;

pub use aave::{aave_rows, AaveLiquidityJob};
pub use eth::{eth_rows, EthInputs, EthLiquidity, EthLiquidityJob, EthVolumes};
pub use rows::{build_rows, format_timestamp, RowContext};

use log::{error, info};

use crate::config_loader::AppConfig;
use crate::domain::traits::RowSink;
use crate::infrastructure::exchange::ExchangeClient;

/// Runs every enabled job once. A failing job is logged and does not stop the others.
pub async fn run_enabled_jobs<S: RowSink>(client: &ExchangeClient, config: &AppConfig, sink: &S) {
    if config.aave.enabled {
        if let Err(e) = AaveLiquidityJob::new(client, &config.aave).run(sink).await {
            error!("Error in AAVE liquidity job: {:#}", e);
        }
    } else {
        info!("AAVE liquidity job disabled");
    }

    if config.eth.enabled {
        if let Err(e) = EthLiquidityJob::new(client, &config.eth).run(sink).await {
            error!("Error in ETH liquidity job: {:#}", e);
        }
    } else {
        info!("ETH liquidity job disabled");
    }
}
