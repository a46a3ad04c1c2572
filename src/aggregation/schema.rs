use crate::aggregation::AggregationError;
use crate::domain::constants::{NARROWEST_THRESHOLDS, NARROW_THRESHOLDS, WIDE_THRESHOLDS};
use crate::domain::enums::{BandGranularity, Side};

/// One percentage-distance bucket, `lower_percent < upper_percent`
#[derive(Clone, Debug, PartialEq)]
pub struct BandDefinition {
    pub lower_percent: f64,
    pub upper_percent: f64,
    pub label: String,
}

impl BandDefinition {
    pub fn new(lower_percent: f64, upper_percent: f64, label: impl Into<String>) -> Self {
        Self {
            lower_percent,
            upper_percent,
            label: label.into(),
        }
    }
}

/// Ordered band definitions for one side of the book, nearest band first.
///
/// Bands are contiguous: the far edge of band `i` is the near edge of band
/// `i + 1`, and the innermost band starts at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct BandSchema {
    side: Side,
    bands: Vec<BandDefinition>,
}

impl BandSchema {
    /// Builds a schema from explicit definitions, rejecting gaps, overlaps and
    /// bands on the wrong side of zero.
    pub fn new(side: Side, bands: Vec<BandDefinition>) -> Result<Self, AggregationError> {
        let schema = Self { side, bands };
        schema.validate()?;
        Ok(schema)
    }

    /// Builds a schema from increasing threshold magnitudes, e.g. `[0.5, 1.5, 3.0]`.
    ///
    /// Bid schemas mirror the thresholds below zero and get labels such as
    /// `"0 to -0.5%"`.
    pub fn from_thresholds(side: Side, thresholds: &[f64]) -> Result<Self, AggregationError> {
        Self::new(side, build_bands(side, thresholds))
    }

    /// One of the built-in schemas
    pub fn for_granularity(granularity: BandGranularity, side: Side) -> Self {
        let thresholds = match granularity {
            BandGranularity::Wide => WIDE_THRESHOLDS,
            BandGranularity::Narrow => NARROW_THRESHOLDS,
            BandGranularity::Narrowest => NARROWEST_THRESHOLDS,
        };
        let schema = Self { side, bands: build_bands(side, thresholds) };
        debug_assert!(schema.validate().is_ok(), "built-in schema {:?} is not contiguous", granularity);
        schema
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn bands(&self) -> &[BandDefinition] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Signed 1-based position of the band carrying `label`: 1, 2, .. for asks
    /// and -1, -2, .. for bids.
    pub fn level_number(&self, label: &str) -> Option<i32> {
        let index = self.bands.iter().position(|b| b.label == label)?;
        let number = index as i32 + 1;
        Some(match self.side {
            Side::Ask => number,
            Side::Bid => -number,
        })
    }

    fn validate(&self) -> Result<(), AggregationError> {
        let first = self.bands.first()
            .ok_or_else(|| AggregationError::InvalidSchema("schema has no bands".to_string()))?;

        for band in &self.bands {
            if !(band.lower_percent.is_finite() && band.upper_percent.is_finite()) {
                return Err(AggregationError::InvalidSchema(format!("band '{}' has a non-finite edge", band.label)));
            }
            if band.lower_percent >= band.upper_percent {
                return Err(AggregationError::InvalidSchema(format!(
                    "band '{}' is empty: {} >= {}", band.label, band.lower_percent, band.upper_percent
                )));
            }
        }

        match self.side {
            Side::Ask => {
                if first.lower_percent != 0.0 {
                    return Err(AggregationError::InvalidSchema(format!(
                        "innermost ask band must start at 0, starts at {}", first.lower_percent
                    )));
                }
                for pair in self.bands.windows(2) {
                    if pair[0].upper_percent != pair[1].lower_percent {
                        return Err(AggregationError::InvalidSchema(format!(
                            "ask bands '{}' and '{}' are not contiguous", pair[0].label, pair[1].label
                        )));
                    }
                }
            }
            Side::Bid => {
                if first.upper_percent != 0.0 {
                    return Err(AggregationError::InvalidSchema(format!(
                        "innermost bid band must end at 0, ends at {}", first.upper_percent
                    )));
                }
                for pair in self.bands.windows(2) {
                    if pair[0].lower_percent != pair[1].upper_percent {
                        return Err(AggregationError::InvalidSchema(format!(
                            "bid bands '{}' and '{}' are not contiguous", pair[0].label, pair[1].label
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn build_bands(side: Side, thresholds: &[f64]) -> Vec<BandDefinition> {
    let mut bands = Vec::with_capacity(thresholds.len());
    let mut near = 0.0_f64;
    for &far in thresholds {
        let band = match side {
            Side::Ask => BandDefinition::new(near, far, format!("{}-{}%", near, far)),
            Side::Bid => BandDefinition::new(-far, -near, format!("{} to -{}%", format_near_bid(near), far)),
        };
        bands.push(band);
        near = far;
    }
    bands
}

// "0 to -0.5%" for the innermost bid band, "-0.5 to -1.5%" after that
fn format_near_bid(near: f64) -> String {
    if near == 0.0 {
        "0".to_string()
    } else {
        format!("-{}", near)
    }
}

/// Ask and bid schemas of the same granularity
#[derive(Clone, Debug, PartialEq)]
pub struct BandSchemas {
    pub asks: BandSchema,
    pub bids: BandSchema,
}

impl BandSchemas {
    pub fn for_granularity(granularity: BandGranularity) -> Self {
        Self {
            asks: BandSchema::for_granularity(granularity, Side::Ask),
            bids: BandSchema::for_granularity(granularity, Side::Bid),
        }
    }

    pub fn for_side(&self, side: Side) -> &BandSchema {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }
}
