pub mod aggregation;
pub mod config_loader;
pub mod domain;
pub mod infrastructure;
pub mod jobs;

pub use aggregation::*;
pub use domain::constants::*;
pub use domain::enums::*;
pub use domain::model::book::*;
pub use domain::model::level::*;
pub use domain::model::liquidity_row::*;
pub use domain::traits::*;
pub use infrastructure::exchange::*;
pub use infrastructure::kafka::*;
