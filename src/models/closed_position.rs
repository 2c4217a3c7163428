use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger entry booked exactly once when a SELL is recorded. The average
/// buy price and rate are a snapshot of the holding's cost basis just
/// before the sale was applied; the realized profit is fixed at creation.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct ClosedPosition {
    id: i64,
    owner_id: String,
    source_transaction_id: i64,
    symbol: String,
    quantity: Decimal,
    avg_buy_price: Decimal,
    avg_buy_rate: Decimal,
    sell_price: Decimal,
    sell_rate: Decimal,
    realized_profit: Decimal,
    closed_at: NaiveDate,
    broker: Option<String>,
}
