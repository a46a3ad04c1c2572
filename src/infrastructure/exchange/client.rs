use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::aggregation::{aggregate_book, BandSchemas};
use crate::domain::enums::Exchange;
use crate::domain::model::book::{OrderBookSnapshot, SourceLiquidity};
use crate::infrastructure::exchange::models::ExchangeEndpoints;
use crate::infrastructure::exchange::parsers::OrderBookParser;

/// Binance caps `/api/v3/trades` at 1000 entries per request
const MAX_TRADES: u32 = 1000;

/// REST client for the exchanges the collector samples.
///
/// Built once at startup and passed to the jobs; the underlying connection
/// pool is shared by every request.
#[derive(Clone)]
pub struct ExchangeClient {
    http: Client,
    endpoints: ExchangeEndpoints,
}

impl ExchangeClient {
    pub fn new(endpoints: ExchangeEndpoints, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, endpoints })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        debug!("GET {} {:?}", url, query);
        let response = self.http.get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Request to {} returned an error status", url))?;

        response.json::<Value>().await
            .with_context(|| format!("Invalid JSON from {}", url))
    }

    /// Binance `GET /api/v3/depth`
    pub async fn binance_depth(&self, symbol: &str, limit: u32) -> Result<OrderBookSnapshot> {
        let url = format!("{}/api/v3/depth", self.endpoints.binance);
        let data = self.get_json(&url, &[("symbol", symbol.to_string()), ("limit", limit.to_string())]).await?;
        OrderBookParser::parse_binance_depth(&data, symbol)
    }

    /// OKX `GET /api/v5/market/books`
    pub async fn okx_depth(&self, inst_id: &str, size: u32) -> Result<OrderBookSnapshot> {
        let url = format!("{}/api/v5/market/books", self.endpoints.okx);
        let data = self.get_json(&url, &[("instId", inst_id.to_string()), ("sz", size.to_string())]).await?;
        OrderBookParser::parse_okx_books(&data, inst_id)
    }

    /// Bybit spot `GET /v5/market/orderbook`
    pub async fn bybit_depth(&self, symbol: &str, limit: u32) -> Result<OrderBookSnapshot> {
        let url = format!("{}/v5/market/orderbook", self.endpoints.bybit);
        let data = self.get_json(&url, &[
            ("category", "spot".to_string()),
            ("symbol", symbol.to_string()),
            ("limit", limit.to_string()),
        ]).await?;
        OrderBookParser::parse_bybit_orderbook(&data, symbol)
    }

    /// Depth snapshot from any supported exchange
    pub async fn depth(&self, exchange: Exchange, symbol: &str, limit: u32) -> Result<OrderBookSnapshot> {
        match exchange {
            Exchange::Binance => self.binance_depth(symbol, limit).await,
            Exchange::Okx => self.okx_depth(symbol, limit).await,
            Exchange::Bybit => self.bybit_depth(symbol, limit).await,
        }
    }

    /// Fetches a book and bands it against its own mid price
    pub async fn source_liquidity(
        &self,
        exchange: Exchange,
        symbol: &str,
        limit: u32,
        source: &str,
        schemas: &BandSchemas,
    ) -> Result<SourceLiquidity> {
        let book = self.depth(exchange, symbol, limit).await?;
        let mid = book.mid_price()
            .ok_or_else(|| anyhow!("{} book for {} has an empty side", exchange, symbol))?;
        let liquidity = aggregate_book(source, mid, &book.asks, &book.bids, schemas)?;
        debug!("{} {}: mid {}, {} ask bands, {} bid bands",
            exchange, symbol, mid, liquidity.asks.len(), liquidity.bids.len());
        Ok(liquidity)
    }

    /// Binance `GET /api/v3/ticker/price`
    pub async fn binance_price(&self, symbol: &str) -> Result<f64> {
        let url = format!("{}/api/v3/ticker/price", self.endpoints.binance);
        let data = self.get_json(&url, &[("symbol", symbol.to_string())]).await?;
        OrderBookParser::parse_ticker_price(&data)
    }

    /// Quote-currency volume traded on Binance in the last `minutes`
    pub async fn binance_recent_volume(&self, symbol: &str, minutes: u64) -> Result<f64> {
        let url = format!("{}/api/v3/trades", self.endpoints.binance);
        let data = self.get_json(&url, &[("symbol", symbol.to_string()), ("limit", MAX_TRADES.to_string())]).await?;
        let since_ms = Utc::now().timestamp_millis() - (minutes as i64) * 60 * 1000;
        OrderBookParser::recent_trade_volume(&data, since_ms)
    }
}
