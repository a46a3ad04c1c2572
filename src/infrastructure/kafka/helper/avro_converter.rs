use apache_avro::types::Value as AvroValue;
use log::debug;

use crate::domain::enums::Side;
use crate::domain::model::liquidity_row::LiquidityRow;

/// Converter for domain models to Avro format
pub struct AvroConverter;

impl AvroConverter {
    /// Convert Side enum to Avro value (symbols: ask, bid)
    pub fn side_to_avro(side: &Side) -> AvroValue {
        match side {
            Side::Ask => AvroValue::Enum(0, "ask".to_string()),
            Side::Bid => AvroValue::Enum(1, "bid".to_string()),
        }
    }

    /// Convert an optional double to a `["null", "double"]` union
    pub fn optional_double_to_avro(value: Option<f64>) -> AvroValue {
        match value {
            Some(v) => AvroValue::Union(1, Box::new(AvroValue::Double(v))),
            None => AvroValue::Union(0, Box::new(AvroValue::Null)),
        }
    }

    /// Convert a LiquidityRow to the field vector expected by the Confluent encoder.
    /// Field order follows `schemas/liquidity/schema.json`.
    pub fn liquidity_row_to_avro_value(row: &LiquidityRow) -> Vec<(&'static str, AvroValue)> {
        debug!("Converting {} to Avro", row);
        vec![
            ("timestamp", AvroValue::String(row.timestamp.clone())),
            ("dataset", AvroValue::String(row.dataset.clone())),
            ("source", AvroValue::String(row.source.clone())),
            ("current_price", AvroValue::Double(row.current_price)),
            ("side", Self::side_to_avro(&row.side)),
            ("level_number", AvroValue::Int(row.level_number)),
            ("level_range", AvroValue::String(row.level_range.clone())),
            ("price", AvroValue::Double(row.price)),
            ("value_usd", AvroValue::Double(row.value_usd)),
            ("volume_3min_usd", Self::optional_double_to_avro(row.volume_3min_usd)),
        ]
    }
}
