use crate::domain::enums::Side;
use crate::domain::model::level::{AggregatedBand, RawOrder};

/// Running reduction of one band: best price seen so far and summed notional
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandAccumulator {
    side: Side,
    best_price: f64,
    total_value: f64,
    count: usize,
}

impl BandAccumulator {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            best_price: f64::NAN,
            total_value: 0.0,
            count: 0,
        }
    }

    /// Adds a raw order, converting it to notional exactly once
    pub fn push(&mut self, order: &RawOrder) {
        self.push_value(order.price, order.notional());
    }

    /// Adds a point whose value is already notional (a reduced band being merged)
    pub fn push_value(&mut self, price: f64, value: f64) {
        if self.count == 0 || self.side.is_better(price, self.best_price) {
            self.best_price = price;
        }
        self.total_value += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The reduced band, or None when nothing was pushed
    pub fn finish(self, label: &str) -> Option<AggregatedBand> {
        if self.count == 0 {
            return None;
        }
        Some(AggregatedBand::new(self.best_price, self.total_value, label))
    }
}

/// Collapses the orders of one band: min price for asks, max price for bids,
/// and the sum of `price * quantity`. Returns None for an empty band.
pub fn reduce_band(orders: &[RawOrder], side: Side, label: &str) -> Option<AggregatedBand> {
    let mut acc = BandAccumulator::new(side);
    for order in orders {
        acc.push(order);
    }
    acc.finish(label)
}
