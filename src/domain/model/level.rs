// Domain model for raw order book levels and reduced bands
use serde::{Deserialize, Serialize};

/// A single resting order (price level) as reported by an exchange.
///
/// `quantity` is always the raw base-asset amount. Conversion to notional
/// value happens once, in [`RawOrder::notional`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawOrder {
    pub price: f64,
    pub quantity: f64,
}

impl RawOrder {
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// Quote-currency value of the order
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}

/// One reduced band: the best price inside it and the total notional it holds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBand {
    /// Best (closest to reference) price among the band's orders
    pub representative_price: f64,

    /// Sum of `price * quantity` over the band's orders
    pub total_value: f64,

    /// Label of the band definition this result belongs to
    pub label: String,
}

impl AggregatedBand {
    pub fn new(representative_price: f64, total_value: f64, label: impl Into<String>) -> Self {
        Self {
            representative_price,
            total_value,
            label: label.into(),
        }
    }
}
