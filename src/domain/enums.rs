use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Side of the order book a band belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ask,
    Bid,
}

// Always serialized as the lowercase string the liquidity schema expects
impl Serialize for Side {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Ask => "ask",
            Side::Bid => "bid",
        }
    }

    /// Returns true when `candidate` is a better (closer to the reference) price than `current`
    pub fn is_better(&self, candidate: f64, current: f64) -> bool {
        match self {
            Side::Ask => candidate < current,
            Side::Bid => candidate > current,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band granularities shipped with the collector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandGranularity {
    /// 0.5% / 1.5% / 3%
    Wide,
    /// 0.25% / 0.6% / 1.5%
    Narrow,
    /// 0.25% / 1%
    Narrowest,
}

/// Exchanges the collector knows how to sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exchange {
    Binance,
    Okx,
    Bybit,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Binance => "Binance",
            Exchange::Okx => "OKX",
            Exchange::Bybit => "Bybit",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote asset a liquidity view is denominated in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuoteAsset {
    Usd,
    Btc,
}

impl QuoteAsset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteAsset::Usd => "USD",
            QuoteAsset::Btc => "BTC",
        }
    }
}

impl fmt::Display for QuoteAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
