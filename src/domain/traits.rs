use std::future::Future;

use anyhow::Result;

use crate::domain::model::liquidity_row::LiquidityRow;

/// Destination for published liquidity rows.
///
/// The Kafka producer is the production sink; jobs only depend on this trait.
pub trait RowSink {
    /// Publishes a batch of rows, failing on the first row that cannot be delivered
    fn publish_rows(&self, rows: &[LiquidityRow]) -> impl Future<Output = Result<()>>;
}
