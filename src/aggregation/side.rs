use log::debug;

use crate::aggregation::classifier::classify;
use crate::aggregation::reducer::BandAccumulator;
use crate::aggregation::schema::{BandSchema, BandSchemas};
use crate::aggregation::{check_reference, AggregationError};
use crate::domain::enums::Side;
use crate::domain::model::book::SourceLiquidity;
use crate::domain::model::level::{AggregatedBand, RawOrder};

/// Bands one side of a book against `reference`.
///
/// Every order is classified once; orders outside the schema are dropped.
/// The result holds one entry per non-empty band, nearest first: ascending
/// price for asks, descending for bids.
pub fn aggregate_side(
    orders: &[RawOrder],
    reference: f64,
    schema: &BandSchema,
) -> Result<Vec<AggregatedBand>, AggregationError> {
    check_reference(reference)?;

    let side = schema.side();
    let mut accumulators = vec![BandAccumulator::new(side); schema.len()];
    let mut dropped = 0usize;

    for order in orders {
        match classify(order, reference, schema) {
            Some(index) => accumulators[index].push(order),
            None => dropped += 1,
        }
    }

    let mut result: Vec<AggregatedBand> = accumulators
        .into_iter()
        .zip(schema.bands())
        .filter_map(|(acc, band)| acc.finish(&band.label))
        .collect();
    sort_nearest_first(&mut result, side);

    debug!("Aggregated {} {} orders into {} bands ({} outside the schema)",
        orders.len(), side, result.len(), dropped);

    Ok(result)
}

/// Bands both sides of a book into a [`SourceLiquidity`]
pub fn aggregate_book(
    source: impl Into<String>,
    reference: f64,
    asks: &[RawOrder],
    bids: &[RawOrder],
    schemas: &BandSchemas,
) -> Result<SourceLiquidity, AggregationError> {
    Ok(SourceLiquidity {
        source: source.into(),
        reference_price: reference,
        asks: aggregate_side(asks, reference, &schemas.asks)?,
        bids: aggregate_side(bids, reference, &schemas.bids)?,
    })
}

pub(crate) fn sort_nearest_first(bands: &mut [AggregatedBand], side: Side) {
    match side {
        Side::Ask => bands.sort_by(|a, b| a.representative_price.total_cmp(&b.representative_price)),
        Side::Bid => bands.sort_by(|a, b| b.representative_price.total_cmp(&a.representative_price)),
    }
}
