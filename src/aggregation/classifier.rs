use crate::aggregation::schema::{BandDefinition, BandSchema};
use crate::domain::enums::Side;
use crate::domain::model::level::RawOrder;

/// Signed distance of `price` from `reference`, in percent
pub fn percent_diff(price: f64, reference: f64) -> f64 {
    (price - reference) / reference * 100.0
}

/// Index of the band `order` falls into, or None when it lies outside the schema.
///
/// `reference` is assumed positive; [`crate::aggregation::aggregate_side`]
/// checks it before classifying anything.
pub fn classify(order: &RawOrder, reference: f64, schema: &BandSchema) -> Option<usize> {
    classify_diff(percent_diff(order.price, reference), schema)
}

/// Interval membership for an already computed percentage distance.
///
/// Ask bands are `(lower, upper]`, except the innermost which is `[0, upper]`:
/// a shared edge belongs to the nearer band.
///
/// Bid bands are `(lower, upper]` as well, so a shared edge belongs to the
/// farther band. The innermost bid band excludes 0 (`diff == 0` is never a
/// bid) and the outermost includes its far edge.
pub fn classify_diff(diff: f64, schema: &BandSchema) -> Option<usize> {
    let side = schema.side();
    let last = schema.len().saturating_sub(1);
    schema
        .bands()
        .iter()
        .enumerate()
        .position(|(index, band)| contains(side, index == 0, index == last, band, diff))
}

fn contains(side: Side, innermost: bool, outermost: bool, band: &BandDefinition, diff: f64) -> bool {
    match side {
        Side::Ask if innermost => band.lower_percent <= diff && diff <= band.upper_percent,
        Side::Ask => band.lower_percent < diff && diff <= band.upper_percent,
        Side::Bid => {
            let past_lower = if outermost { band.lower_percent <= diff } else { band.lower_percent < diff };
            let within_upper = if innermost { diff < band.upper_percent } else { diff <= band.upper_percent };
            past_lower && within_upper
        }
    }
}
