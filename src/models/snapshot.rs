use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Persisted daily totals, one row per owner per calendar day. Re-running
/// for the same day overwrites the existing row.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct PortfolioSnapshot {
    owner_id: String,
    date: NaiveDate,
    value: Decimal,
    invested: Decimal,
    profit: Decimal,
}
