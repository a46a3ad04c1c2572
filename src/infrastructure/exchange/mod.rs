//! REST access to exchange order books, prices and trades
pub mod client;
pub mod models;
pub mod parsers;

pub use client::ExchangeClient;
pub use models::ExchangeEndpoints;
pub use parsers::OrderBookParser;
