//! Liquidity band aggregation
//!
//! Reduces the raw levels of an order book into a handful of bands, each
//! describing how much notional sits within a fixed percentage distance of a
//! reference price:
//!
//! - [`schema`]: ordered, side-specific band definitions
//! - [`classifier`]: assigns one order to at most one band
//! - [`reducer`]: collapses a band's orders into a (best price, total value) point
//! - [`side`]: classifier + reducer over a full side of the book
//! - [`merger`]: re-buckets already reduced bands from several sources
//!
//! Everything in here is pure and synchronous. Fetching, scheduling and
//! publishing live in `infrastructure` and `jobs`.

pub mod classifier;
pub mod error;
pub mod merger;
pub mod reducer;
pub mod schema;
pub mod side;

pub use classifier::{classify, classify_diff, percent_diff};
pub use error::AggregationError;
pub use merger::{merge_bands, merge_books};
pub use reducer::{reduce_band, BandAccumulator};
pub use schema::{BandDefinition, BandSchema, BandSchemas};
pub use side::{aggregate_book, aggregate_side};

/// Fails fast on a reference price that cannot anchor a percentage distance
pub(crate) fn check_reference(reference: f64) -> Result<(), AggregationError> {
    if reference.is_finite() && reference > 0.0 {
        Ok(())
    } else {
        Err(AggregationError::InvalidReference(reference))
    }
}
