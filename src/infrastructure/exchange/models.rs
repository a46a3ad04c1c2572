// Models for exchange REST responses
use serde::Deserialize;

/// `GET /api/v3/ticker/price`
#[derive(Debug, Deserialize)]
pub struct BinanceTickerPrice {
    pub symbol: String,
    pub price: String,
}

/// One entry of `GET /api/v3/trades`
#[derive(Debug, Deserialize)]
pub struct BinanceTrade {
    pub price: String,
    pub qty: String,
    /// Trade time, milliseconds since epoch
    pub time: i64,
}

/// REST base URLs, overridable from the config file
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeEndpoints {
    #[serde(default = "default_binance_url")]
    pub binance: String,

    #[serde(default = "default_okx_url")]
    pub okx: String,

    #[serde(default = "default_bybit_url")]
    pub bybit: String,
}

fn default_binance_url() -> String {
    "https://api.binance.com".to_string()
}

fn default_okx_url() -> String {
    "https://www.okx.com".to_string()
}

fn default_bybit_url() -> String {
    "https://api.bybit.com".to_string()
}

impl Default for ExchangeEndpoints {
    fn default() -> Self {
        Self {
            binance: default_binance_url(),
            okx: default_okx_url(),
            bybit: default_bybit_url(),
        }
    }
}
