pub mod helper;
pub mod producer;

pub use helper::{AvroConverter, SchemaHelper};
pub use producer::{KafkaProducer, LIQUIDITY_TOPIC_TYPE};
