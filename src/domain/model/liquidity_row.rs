use std::fmt;
use serde::Serialize;

use crate::domain::enums::Side;

/// One published row of the liquidity time series
#[derive(Clone, Debug, Serialize)]
pub struct LiquidityRow {
    /// UTC sampling time, minute precision
    pub timestamp: String,

    /// Dataset the row belongs to (e.g. "aave", "eth")
    pub dataset: String,

    /// Exchange name or quote asset
    pub source: String,

    /// Reference price of the source at sampling time
    pub current_price: f64,

    pub side: Side,

    /// Signed band position: 1, 2, 3 for asks and -1, -2, -3 for bids
    pub level_number: i32,

    /// Band label, e.g. "0-0.5%"
    pub level_range: String,

    /// Representative price of the band
    pub price: f64,

    /// Band notional converted to USD
    pub value_usd: f64,

    /// Recent traded volume in USD, when the dataset tracks it
    pub volume_3min_usd: Option<f64>,
}

impl fmt::Display for LiquidityRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiquidityRow {{ {} {} {} {}: price: {}, value_usd: {} }}",
            self.dataset, self.source, self.side, self.level_range, self.price, self.value_usd)
    }
}
