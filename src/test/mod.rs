mod anomaly;
mod benchmark;
mod cache;
mod history;
mod summary;
mod valuation;
