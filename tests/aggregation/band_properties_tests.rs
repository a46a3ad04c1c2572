use liquidity_bands::aggregation::{aggregate_side, classify, percent_diff, BandSchema, BandSchemas};
use liquidity_bands::domain::enums::{BandGranularity, Side};
use liquidity_bands::domain::model::level::RawOrder;

fn sample_asks() -> Vec<RawOrder> {
    vec![
        RawOrder::new(1000.0, 0.7),
        RawOrder::new(1001.0, 2.0),
        RawOrder::new(1002.5, 1.5),
        RawOrder::new(1004.0, 0.3),
        RawOrder::new(1006.0, 4.0),
        RawOrder::new(1010.0, 1.25),
        RawOrder::new(1015.0, 0.5),
        RawOrder::new(1020.0, 9.0),
    ]
}

fn sample_bids() -> Vec<RawOrder> {
    vec![
        RawOrder::new(999.0, 3.0),
        RawOrder::new(997.5, 1.0),
        RawOrder::new(996.0, 2.5),
        RawOrder::new(994.0, 0.8),
        RawOrder::new(990.0, 1.1),
        RawOrder::new(985.0, 6.0),
        RawOrder::new(980.0, 2.0),
        RawOrder::new(1000.0, 5.0),
    ]
}

#[test]
fn test_band_totals_equal_notional_of_classified_orders() {
    for granularity in [BandGranularity::Wide, BandGranularity::Narrow, BandGranularity::Narrowest] {
        let schemas = BandSchemas::for_granularity(granularity);
        for (orders, schema) in [(sample_asks(), &schemas.asks), (sample_bids(), &schemas.bids)] {
            let bands = aggregate_side(&orders, 1000.0, schema).unwrap();

            let mut expected = vec![0.0; schema.len()];
            for order in &orders {
                if let Some(index) = classify(order, 1000.0, schema) {
                    expected[index] += order.price * order.quantity;
                }
            }

            for band in &bands {
                let index = schema.bands().iter().position(|b| b.label == band.label).unwrap();
                assert!((band.total_value - expected[index]).abs() < 1e-9,
                    "{:?} {}: {} != {}", granularity, band.label, band.total_value, expected[index]);
            }

            let banded: f64 = bands.iter().map(|b| b.total_value).sum();
            let classified: f64 = expected.iter().sum();
            assert!((banded - classified).abs() < 1e-9);
        }
    }
}

#[test]
fn test_representative_price_is_an_assigned_order_price() {
    let schemas = BandSchemas::for_granularity(BandGranularity::Narrow);
    for (orders, schema) in [(sample_asks(), &schemas.asks), (sample_bids(), &schemas.bids)] {
        for band in aggregate_side(&orders, 1000.0, schema).unwrap() {
            let index = schema.bands().iter().position(|b| b.label == band.label).unwrap();
            let assigned: Vec<f64> = orders.iter()
                .filter(|o| classify(o, 1000.0, schema) == Some(index))
                .map(|o| o.price)
                .collect();
            assert!(assigned.contains(&band.representative_price));

            let best = match schema.side() {
                Side::Ask => assigned.iter().cloned().fold(f64::INFINITY, f64::min),
                Side::Bid => assigned.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            };
            assert_eq!(band.representative_price, best);
        }
    }
}

#[test]
fn test_output_is_sorted_nearest_first() {
    let schemas = BandSchemas::for_granularity(BandGranularity::Wide);

    let mut asks = sample_asks();
    asks.reverse();
    let ask_bands = aggregate_side(&asks, 1000.0, &schemas.asks).unwrap();
    assert!(ask_bands.windows(2).all(|w| w[0].representative_price < w[1].representative_price));

    let bid_bands = aggregate_side(&sample_bids(), 1000.0, &schemas.bids).unwrap();
    assert!(bid_bands.windows(2).all(|w| w[0].representative_price > w[1].representative_price));
}

#[test]
fn test_narrow_boundaries_at_reference_1000() {
    let schemas = BandSchemas::for_granularity(BandGranularity::Narrow);

    assert_eq!(percent_diff(1002.5, 1000.0), 0.25);
    assert_eq!(percent_diff(997.5, 1000.0), -0.25);

    let asks = aggregate_side(&[RawOrder::new(1002.5, 1.0)], 1000.0, &schemas.asks).unwrap();
    assert_eq!(asks.len(), 1);
    assert_eq!(asks[0].label, "0-0.25%");

    let bids = aggregate_side(&[RawOrder::new(997.5, 1.0)], 1000.0, &schemas.bids).unwrap();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].label, "-0.25 to -0.6%");

    // Outer edges
    let asks = aggregate_side(&[RawOrder::new(1006.0, 1.0), RawOrder::new(1015.0, 1.0)], 1000.0, &schemas.asks).unwrap();
    let labels: Vec<_> = asks.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["0.25-0.6%", "0.6-1.5%"]);

    let bids = aggregate_side(&[RawOrder::new(994.0, 1.0), RawOrder::new(985.0, 1.0)], 1000.0, &schemas.bids).unwrap();
    let labels: Vec<_> = bids.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["-0.6 to -1.5%"]);
    assert_eq!(bids[0].representative_price, 994.0);
}

#[test]
fn test_order_at_reference_is_an_ask_never_a_bid() {
    let schemas = BandSchemas::for_granularity(BandGranularity::Wide);
    let at_reference = [RawOrder::new(1000.0, 2.0)];

    let asks = aggregate_side(&at_reference, 1000.0, &schemas.asks).unwrap();
    assert_eq!(asks.len(), 1);
    assert_eq!(asks[0].label, "0-0.5%");
    assert_eq!(asks[0].total_value, 2000.0);

    let bids = aggregate_side(&at_reference, 1000.0, &schemas.bids).unwrap();
    assert!(bids.is_empty());
}

#[test]
fn test_orders_beyond_the_outermost_band_are_dropped() {
    let schema = BandSchema::for_granularity(BandGranularity::Narrowest, Side::Ask);
    let bands = aggregate_side(&[RawOrder::new(1010.1, 1.0), RawOrder::new(990.0, 1.0)], 1000.0, &schema).unwrap();
    assert!(bands.is_empty());
}

#[test]
fn test_value_is_multiplied_by_price_once() {
    let schema = BandSchema::for_granularity(BandGranularity::Narrowest, Side::Ask);
    let bands = aggregate_side(&[RawOrder::new(2000.0, 3.0)], 2000.0, &schema).unwrap();
    assert_eq!(bands[0].total_value, 6000.0);
}
