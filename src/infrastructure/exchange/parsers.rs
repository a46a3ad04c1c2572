use anyhow::{anyhow, Context, Result};
use log::warn;
use serde_json::Value;

use crate::domain::model::book::OrderBookSnapshot;
use crate::domain::model::level::RawOrder;
use crate::infrastructure::exchange::models::{BinanceTickerPrice, BinanceTrade};

/// Parses exchange REST payloads into domain types.
///
/// Quantities are kept as raw base-asset amounts; nothing here converts to
/// notional.
pub struct OrderBookParser;

impl OrderBookParser {
    /// Parses `[["price", "qty", ...], ...]` level arrays.
    ///
    /// Extra trailing fields (OKX sends order counts) are ignored. Levels with a
    /// non-positive price or negative quantity are skipped.
    pub fn parse_levels(levels: &Value) -> Result<Vec<RawOrder>> {
        let entries = levels.as_array()
            .ok_or_else(|| anyhow!("Expected an array of price levels"))?;

        let mut orders = Vec::with_capacity(entries.len());
        for entry in entries {
            let price = Self::number(&entry[0])
                .ok_or_else(|| anyhow!("Missing price in level {}", entry))?;
            let quantity = Self::number(&entry[1])
                .ok_or_else(|| anyhow!("Missing quantity in level {}", entry))?;

            if price <= 0.0 || quantity < 0.0 {
                warn!("Skipping invalid level {}", entry);
                continue;
            }
            orders.push(RawOrder::new(price, quantity));
        }
        Ok(orders)
    }

    /// Binance `GET /api/v3/depth`
    pub fn parse_binance_depth(data: &Value, symbol: &str) -> Result<OrderBookSnapshot> {
        let bids = Self::parse_levels(&data["bids"]).context("Binance bids")?;
        let asks = Self::parse_levels(&data["asks"]).context("Binance asks")?;
        Ok(OrderBookSnapshot::new(symbol, bids, asks))
    }

    /// OKX `GET /api/v5/market/books`, book under `data[0]`
    pub fn parse_okx_books(data: &Value, inst_id: &str) -> Result<OrderBookSnapshot> {
        let code = data["code"].as_str().unwrap_or_default();
        if code != "0" {
            return Err(anyhow!("OKX returned code '{}': {}", code, data["msg"].as_str().unwrap_or_default()));
        }

        let book = data["data"].get(0)
            .ok_or_else(|| anyhow!("OKX response has no book for {}", inst_id))?;
        let bids = Self::parse_levels(&book["bids"]).context("OKX bids")?;
        let asks = Self::parse_levels(&book["asks"]).context("OKX asks")?;
        Ok(OrderBookSnapshot::new(inst_id, bids, asks))
    }

    /// Bybit `GET /v5/market/orderbook`, book under `result.a` / `result.b`
    pub fn parse_bybit_orderbook(data: &Value, symbol: &str) -> Result<OrderBookSnapshot> {
        let ret_code = data["retCode"].as_i64()
            .ok_or_else(|| anyhow!("Missing retCode"))?;
        if ret_code != 0 {
            return Err(anyhow!("Bybit returned retCode {}: {}", ret_code, data["retMsg"].as_str().unwrap_or_default()));
        }

        let result = &data["result"];
        let bids = Self::parse_levels(&result["b"]).context("Bybit bids")?;
        let asks = Self::parse_levels(&result["a"]).context("Bybit asks")?;
        Ok(OrderBookSnapshot::new(symbol, bids, asks))
    }

    /// Binance `GET /api/v3/ticker/price`
    pub fn parse_ticker_price(data: &Value) -> Result<f64> {
        let ticker: BinanceTickerPrice = serde_json::from_value(data.clone())
            .context("Failed to parse ticker price")?;
        ticker.price.parse::<f64>()
            .with_context(|| format!("Invalid price '{}' for {}", ticker.price, ticker.symbol))
    }

    /// Quote-currency volume of the trades newer than `since_ms`
    pub fn recent_trade_volume(data: &Value, since_ms: i64) -> Result<f64> {
        let trades: Vec<BinanceTrade> = serde_json::from_value(data.clone())
            .context("Failed to parse trades")?;

        let mut volume = 0.0;
        for trade in trades.iter().filter(|t| t.time > since_ms) {
            let price: f64 = trade.price.parse().context("Invalid trade price")?;
            let qty: f64 = trade.qty.parse().context("Invalid trade quantity")?;
            volume += price * qty;
        }
        Ok(volume)
    }

    // Exchanges send numbers as strings, but accept plain JSON numbers too
    fn number(value: &Value) -> Option<f64> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}
