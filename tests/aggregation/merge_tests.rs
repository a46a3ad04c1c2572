use liquidity_bands::aggregation::{aggregate_book, aggregate_side, merge_bands, merge_books, AggregationError, BandSchema, BandSchemas};
use liquidity_bands::domain::enums::{BandGranularity, Side};
use liquidity_bands::domain::model::book::SourceLiquidity;
use liquidity_bands::domain::model::level::{AggregatedBand, RawOrder};

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}

#[test]
fn test_two_sources_in_the_same_band_merge_into_one() {
    // One wide innermost band so both representative prices land in it
    let asks = BandSchema::from_thresholds(Side::Ask, &[1.5, 3.0]).unwrap();
    let label = asks.bands()[0].label.clone();

    let a = vec![AggregatedBand::new(100.0, 500.0, label.clone())];
    let b = vec![AggregatedBand::new(101.0, 300.0, label.clone())];
    let merged = merge_bands(&[Some(a.as_slice()), Some(b.as_slice())], 100.0, &asks).unwrap();

    assert_eq!(merged, vec![AggregatedBand::new(100.0, 800.0, label)]);
}

#[test]
fn test_remerge_reproduces_a_single_source() {
    let schemas = BandSchemas::for_granularity(BandGranularity::Narrow);
    let asks = [RawOrder::new(2001.0, 1.2), RawOrder::new(2008.0, 0.4), RawOrder::new(2020.0, 3.0)];
    let bids = [RawOrder::new(1999.0, 0.9), RawOrder::new(1993.0, 2.0), RawOrder::new(1975.0, 1.0)];
    let book = aggregate_book("ETHUSDT", 2000.0, &asks, &bids, &schemas).unwrap();

    let merged = merge_books("USD", &[Some(&book)], &schemas).unwrap();
    assert_eq!(merged.asks, book.asks);
    assert_eq!(merged.bids, book.bids);
}

#[test]
fn test_same_list_twice_doubles_values_exactly() {
    let bids = BandSchema::for_granularity(BandGranularity::Wide, Side::Bid);
    let orders = [RawOrder::new(99.7, 2.0), RawOrder::new(98.0, 5.0)];
    let once = aggregate_side(&orders, 100.0, &bids).unwrap();

    let twice = merge_bands(&[Some(once.as_slice()), Some(once.as_slice())], 100.0, &bids).unwrap();
    assert_eq!(twice.len(), once.len());
    for (doubled, single) in twice.iter().zip(&once) {
        assert_eq!(doubled.label, single.label);
        assert_eq!(doubled.representative_price, single.representative_price);
        assert_close(doubled.total_value, 2.0 * single.total_value);
    }
}

#[test]
fn test_stablecoin_books_merge_under_the_first_reference() {
    let schemas = BandSchemas::for_granularity(BandGranularity::Narrow);
    let usdt = aggregate_book(
        "USDT", 1000.0,
        &[RawOrder::new(1001.0, 2.0), RawOrder::new(1005.0, 1.0)],
        &[RawOrder::new(999.0, 3.0)],
        &schemas,
    ).unwrap();
    // 1003.0 is 0.2% from its own mid but 0.3% from the USDT mid
    let usdc = aggregate_book(
        "USDC", 1001.0,
        &[RawOrder::new(1003.0, 1.0)],
        &[RawOrder::new(1000.5, 1.0)],
        &schemas,
    ).unwrap();
    assert_eq!(usdc.asks[0].label, "0-0.25%");

    let usd = merge_books("USD", &[Some(&usdt), Some(&usdc)], &schemas).unwrap();
    assert_eq!(usd.reference_price, 1000.0);

    let labels: Vec<_> = usd.asks.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["0-0.25%", "0.25-0.6%"]);
    assert_close(usd.asks[1].total_value, 1005.0 + 1003.0);
    assert_eq!(usd.asks[1].representative_price, 1003.0);

    // 1000.5 sits above the USDT mid, so it no longer counts as a bid
    assert_eq!(usd.bids, vec![AggregatedBand::new(999.0, 2997.0, "0 to -0.25%")]);
}

#[test]
fn test_merge_refuses_partial_input() {
    let schemas = BandSchemas::for_granularity(BandGranularity::Wide);
    let full = SourceLiquidity {
        source: "USDT".to_string(),
        reference_price: 100.0,
        asks: vec![AggregatedBand::new(100.2, 10.0, "0-0.5%")],
        bids: vec![AggregatedBand::new(99.8, 10.0, "0 to -0.5%")],
    };
    let one_sided = SourceLiquidity {
        source: "USDC".to_string(),
        reference_price: 100.0,
        asks: vec![AggregatedBand::new(100.2, 10.0, "0-0.5%")],
        bids: vec![],
    };

    assert_eq!(
        merge_books("USD", &[Some(&full), None], &schemas).unwrap_err(),
        AggregationError::IncompleteMergeInput { sources: 2, missing: 1 }
    );
    assert_eq!(
        merge_books("USD", &[Some(&full), Some(&one_sided)], &schemas).unwrap_err(),
        AggregationError::IncompleteMergeInput { sources: 2, missing: 1 }
    );
    assert!(matches!(
        merge_books("USD", &[], &schemas),
        Err(AggregationError::IncompleteMergeInput { sources: 0, .. })
    ));
}
