pub mod exchange;
pub mod kafka;
