use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sparse daily closing prices; weekend and holiday gaps are expected.
pub type PriceSeries = BTreeMap<NaiveDate, Decimal>;

/// Per-symbol price series.
pub type PriceMap = HashMap<String, PriceSeries>;

/// One point of the reconstructed portfolio history, all amounts in the
/// reporting currency.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct DailySeriesPoint {
    date: NaiveDate,
    invested: Decimal,
    value: Decimal,
    profit: Decimal,
    profit_percent: Decimal,
}

/// One point of the "what if every contribution had bought the index"
/// comparison line.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct BenchmarkPoint {
    date: NaiveDate,
    units: Decimal,
    value: Decimal,
}
