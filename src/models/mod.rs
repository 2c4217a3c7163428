pub mod closed_position;
pub mod holding;
pub mod quote;
pub mod series;
pub mod snapshot;
pub mod summary;
pub mod transaction;

pub use closed_position::ClosedPosition;
pub use holding::Holding;
pub use quote::Quote;
pub use series::{BenchmarkPoint, DailySeriesPoint, PriceMap, PriceSeries};
pub use snapshot::PortfolioSnapshot;
pub use summary::PortfolioSummary;
pub use transaction::{AssetType, Transaction, TransactionType};
