// Band thresholds in percent of the reference price, ordered near to far.
// Bid schemas use the same magnitudes with a negative sign.
pub const WIDE_THRESHOLDS: &[f64] = &[0.5, 1.5, 3.0];
pub const NARROW_THRESHOLDS: &[f64] = &[0.25, 0.6, 1.5];
pub const NARROWEST_THRESHOLDS: &[f64] = &[0.25, 1.0];

/// Row timestamps are truncated to the minute
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Default sampling period (the collector runs every three minutes)
pub const DEFAULT_INTERVAL_SECS: u64 = 180;

/// Trade volume lookback used for the ETH dataset
pub const DEFAULT_VOLUME_WINDOW_MINUTES: u64 = 3;

pub const DATASET_AAVE: &str = "aave";
pub const DATASET_ETH: &str = "eth";
