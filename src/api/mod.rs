pub mod fmp;
pub mod fmp_dto;
pub mod frank;
pub mod frank_dto;
pub mod source;
pub mod utils;

pub use source::{FmpMarketData, MarketDataSource};
