pub mod avro_converter;
pub mod schema_helper;

pub use avro_converter::AvroConverter;
pub use schema_helper::SchemaHelper;
