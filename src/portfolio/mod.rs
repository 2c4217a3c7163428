pub mod anomaly;
pub mod benchmark;
pub mod history;
pub mod holdings;
pub mod realized;
pub mod replay;
pub mod summary;
pub mod valuation;
