use chrono::{DateTime, Utc};
use log::warn;

use crate::aggregation::{BandSchema, BandSchemas};
use crate::domain::constants::TIMESTAMP_FORMAT;
use crate::domain::enums::Side;
use crate::domain::model::book::SourceLiquidity;
use crate::domain::model::level::AggregatedBand;
use crate::domain::model::liquidity_row::LiquidityRow;

/// Row fields shared by every band of one source
#[derive(Clone, Debug)]
pub struct RowContext<'a> {
    pub dataset: &'a str,
    pub timestamp: &'a str,
    /// Multiplier from the source's quote currency to USD (1.0 for USD quotes)
    pub usd_rate: f64,
    pub volume_usd: Option<f64>,
}

/// Minute-precision UTC timestamp stamped on every row of one run
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Flattens a banded source into rows, asks first then bids.
///
/// `level_number` comes from each band's position in `schemas`.
pub fn build_rows(liquidity: &SourceLiquidity, schemas: &BandSchemas, ctx: &RowContext<'_>) -> Vec<LiquidityRow> {
    let mut rows = Vec::with_capacity(liquidity.asks.len() + liquidity.bids.len());
    push_side_rows(&mut rows, liquidity, &liquidity.asks, &schemas.asks, ctx);
    push_side_rows(&mut rows, liquidity, &liquidity.bids, &schemas.bids, ctx);
    rows
}

fn push_side_rows(
    rows: &mut Vec<LiquidityRow>,
    liquidity: &SourceLiquidity,
    bands: &[AggregatedBand],
    schema: &BandSchema,
    ctx: &RowContext<'_>,
) {
    let side: Side = schema.side();
    for band in bands {
        let Some(level_number) = schema.level_number(&band.label) else {
            warn!("Band {} of {} is not part of the {} schema, skipping", band.label, liquidity.source, side);
            continue;
        };
        rows.push(LiquidityRow {
            timestamp: ctx.timestamp.to_string(),
            dataset: ctx.dataset.to_string(),
            source: liquidity.source.clone(),
            current_price: liquidity.reference_price,
            side,
            level_number,
            level_range: band.label.clone(),
            price: band.representative_price,
            value_usd: band.total_value * ctx.usd_rate,
            volume_3min_usd: ctx.volume_usd,
        });
    }
}
