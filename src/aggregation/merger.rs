//! Hierarchical merge of already reduced band lists.
//!
//! Each reduced band of each source is treated as one synthetic order at its
//! representative price carrying its total value, and re-bucketed against a
//! shared reference price with the same schema. Values are carried through as
//! notional, so no price multiplication happens on this path. A merged list
//! can be merged again.

use log::debug;

use crate::aggregation::classifier::classify_diff;
use crate::aggregation::classifier::percent_diff;
use crate::aggregation::reducer::BandAccumulator;
use crate::aggregation::schema::{BandSchema, BandSchemas};
use crate::aggregation::side::sort_nearest_first;
use crate::aggregation::{check_reference, AggregationError};
use crate::domain::model::book::SourceLiquidity;
use crate::domain::model::level::AggregatedBand;

/// Merges one side of several sources under `reference`.
///
/// `None` marks a source whose upstream fetch failed. Any missing or empty
/// source aborts the merge with [`AggregationError::IncompleteMergeInput`];
/// partial merges are never produced.
pub fn merge_bands(
    sources: &[Option<&[AggregatedBand]>],
    reference: f64,
    schema: &BandSchema,
) -> Result<Vec<AggregatedBand>, AggregationError> {
    check_complete(sources.iter().map(|s| s.map_or(true, |bands| bands.is_empty())), sources.len())?;
    check_reference(reference)?;

    let side = schema.side();
    let mut accumulators = vec![BandAccumulator::new(side); schema.len()];
    let mut dropped = 0usize;

    for band in sources.iter().flatten().flat_map(|bands| bands.iter()) {
        let diff = percent_diff(band.representative_price, reference);
        match classify_diff(diff, schema) {
            Some(index) => accumulators[index].push_value(band.representative_price, band.total_value),
            None => dropped += 1,
        }
    }

    let mut merged: Vec<AggregatedBand> = accumulators
        .into_iter()
        .zip(schema.bands())
        .filter_map(|(acc, def)| acc.finish(&def.label))
        .collect();
    sort_nearest_first(&mut merged, side);

    debug!("Merged {} {} sources into {} bands ({} bands fell outside the schema)",
        sources.len(), side, merged.len(), dropped);

    Ok(merged)
}

/// Merges both sides of several sources into one view named `source`.
///
/// The first source's reference price becomes the shared reference.
pub fn merge_books(
    source: impl Into<String>,
    sources: &[Option<&SourceLiquidity>],
    schemas: &BandSchemas,
) -> Result<SourceLiquidity, AggregationError> {
    check_complete(sources.iter().map(|s| s.is_none()), sources.len())?;

    let reference = sources
        .first()
        .copied()
        .flatten()
        .map(|s| s.reference_price)
        .ok_or(AggregationError::IncompleteMergeInput { sources: 0, missing: 0 })?;

    let asks: Vec<Option<&[AggregatedBand]>> = sources.iter().map(|s| s.map(|l| l.asks.as_slice())).collect();
    let bids: Vec<Option<&[AggregatedBand]>> = sources.iter().map(|s| s.map(|l| l.bids.as_slice())).collect();

    Ok(SourceLiquidity {
        source: source.into(),
        reference_price: reference,
        asks: merge_bands(&asks, reference, &schemas.asks)?,
        bids: merge_bands(&bids, reference, &schemas.bids)?,
    })
}

fn check_complete(missing_flags: impl Iterator<Item = bool>, sources: usize) -> Result<(), AggregationError> {
    let missing = missing_flags.filter(|&missing| missing).count();
    if sources == 0 || missing > 0 {
        return Err(AggregationError::IncompleteMergeInput { sources, missing });
    }
    Ok(())
}
