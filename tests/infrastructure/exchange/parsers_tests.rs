use anyhow::Result;
use serde_json::json;
use liquidity_bands::domain::model::level::RawOrder;
use liquidity_bands::infrastructure::exchange::OrderBookParser;

#[test]
fn test_parse_binance_depth() -> Result<()> {
    let data = json!({
        "lastUpdateId": 1027024,
        "bids": [["4.00000000", "431.00000000"], ["3.99000000", "9.00000000"]],
        "asks": [["4.00000200", "12.00000000"], ["4.10000000", "1.50000000"]]
    });

    let book = OrderBookParser::parse_binance_depth(&data, "AAVEUSDT")?;

    assert_eq!(book.symbol, "AAVEUSDT");
    assert_eq!(book.bids, vec![RawOrder::new(4.0, 431.0), RawOrder::new(3.99, 9.0)]);
    assert_eq!(book.asks[0], RawOrder::new(4.000002, 12.0));
    assert_eq!(book.best_bid(), Some(4.0));
    assert_eq!(book.best_ask(), Some(4.000002));
    assert_eq!(book.mid_price(), Some((4.0 + 4.000002) / 2.0));

    Ok(())
}

#[test]
fn test_parse_okx_books_ignores_extra_fields() -> Result<()> {
    let data = json!({
        "code": "0",
        "msg": "",
        "data": [{
            "asks": [["95.12", "3.5", "0", "2"], ["95.20", "1", "0", "1"]],
            "bids": [["95.10", "8", "0", "4"]],
            "ts": "1700000000000"
        }]
    });

    let book = OrderBookParser::parse_okx_books(&data, "AAVE-USDT")?;

    assert_eq!(book.symbol, "AAVE-USDT");
    assert_eq!(book.asks, vec![RawOrder::new(95.12, 3.5), RawOrder::new(95.20, 1.0)]);
    assert_eq!(book.bids, vec![RawOrder::new(95.10, 8.0)]);

    Ok(())
}

#[test]
fn test_parse_okx_error_code() {
    let data = json!({ "code": "51001", "msg": "Instrument ID does not exist", "data": [] });
    let err = OrderBookParser::parse_okx_books(&data, "NOPE-USDT").unwrap_err();
    assert!(err.to_string().contains("51001"));
}

#[test]
fn test_parse_bybit_orderbook() -> Result<()> {
    let data = json!({
        "retCode": 0,
        "retMsg": "OK",
        "result": {
            "s": "AAVEUSDT",
            "a": [["95.15", "2.1"]],
            "b": [["95.05", "4.4"], ["95.00", "10"]],
            "ts": 1700000000000i64,
            "u": 123
        }
    });

    let book = OrderBookParser::parse_bybit_orderbook(&data, "AAVEUSDT")?;

    assert_eq!(book.asks, vec![RawOrder::new(95.15, 2.1)]);
    assert_eq!(book.bids.len(), 2);
    assert_eq!(book.best_bid(), Some(95.05));

    let failed = json!({ "retCode": 10001, "retMsg": "params error", "result": {} });
    assert!(OrderBookParser::parse_bybit_orderbook(&failed, "AAVEUSDT").is_err());

    Ok(())
}

#[test]
fn test_parse_levels_accepts_numbers_and_skips_invalid_levels() -> Result<()> {
    let levels = json!([[100.5, 2], ["0", "5"], ["101", "-1"], ["102", "0"]]);

    let orders = OrderBookParser::parse_levels(&levels)?;

    assert_eq!(orders, vec![RawOrder::new(100.5, 2.0), RawOrder::new(102.0, 0.0)]);

    assert!(OrderBookParser::parse_levels(&json!({ "bids": [] })).is_err());
    assert!(OrderBookParser::parse_levels(&json!([["abc", "1"]])).is_err());

    Ok(())
}

#[test]
fn test_empty_side_has_no_mid_price() -> Result<()> {
    let data = json!({ "bids": [], "asks": [["10", "1"]] });
    let book = OrderBookParser::parse_binance_depth(&data, "ETHBTC")?;
    assert_eq!(book.mid_price(), None);
    Ok(())
}

#[test]
fn test_parse_ticker_price() -> Result<()> {
    let data = json!({ "symbol": "BTCUSDT", "price": "64250.12000000" });
    assert_eq!(OrderBookParser::parse_ticker_price(&data)?, 64250.12);

    assert!(OrderBookParser::parse_ticker_price(&json!({ "code": -1121, "msg": "Invalid symbol." })).is_err());
    Ok(())
}

#[test]
fn test_recent_trade_volume_counts_only_newer_trades() -> Result<()> {
    let data = json!([
        { "id": 1, "price": "2000.0", "qty": "0.5", "quoteQty": "1000.0", "time": 1_000, "isBuyerMaker": true, "isBestMatch": true },
        { "id": 2, "price": "2001.0", "qty": "1.0", "quoteQty": "2001.0", "time": 5_000, "isBuyerMaker": false, "isBestMatch": true },
        { "id": 3, "price": "2002.0", "qty": "2.0", "quoteQty": "4004.0", "time": 6_000, "isBuyerMaker": false, "isBestMatch": true }
    ]);

    let volume = OrderBookParser::recent_trade_volume(&data, 1_000)?;
    assert_eq!(volume, 2001.0 + 4004.0);

    assert_eq!(OrderBookParser::recent_trade_volume(&json!([]), 0)?, 0.0);
    Ok(())
}
