pub mod book;
pub mod level;
pub mod liquidity_row;
