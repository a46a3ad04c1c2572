use serde::Serialize;

use crate::domain::model::level::{AggregatedBand, RawOrder};

/// Order book snapshot returned by one REST depth request
#[derive(Clone, Debug)]
pub struct OrderBookSnapshot {
    pub symbol: String,
    /// Bids as returned by the exchange (best first)
    pub bids: Vec<RawOrder>,
    /// Asks as returned by the exchange (best first)
    pub asks: Vec<RawOrder>,
}

impl OrderBookSnapshot {
    pub fn new(symbol: impl Into<String>, bids: Vec<RawOrder>, asks: Vec<RawOrder>) -> Self {
        Self {
            symbol: symbol.into(),
            bids,
            asks,
        }
    }

    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|o| o.price)
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|o| o.price)
    }

    /// Mid price `(best_bid + best_ask) / 2`, None when either side is empty
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }
}

/// Banded view of one source (an exchange, or a merged quote asset)
#[derive(Clone, Debug, Serialize)]
pub struct SourceLiquidity {
    /// Exchange name or quote asset this view describes
    pub source: String,

    /// Reference price the bands were classified against
    pub reference_price: f64,

    /// Ask bands, nearest first
    pub asks: Vec<AggregatedBand>,

    /// Bid bands, nearest first
    pub bids: Vec<AggregatedBand>,
}

impl SourceLiquidity {
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }
}
