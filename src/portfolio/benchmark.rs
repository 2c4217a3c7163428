use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use crate::models::{BenchmarkPoint, PriceSeries, Transaction};
use crate::portfolio::replay::{ForwardFill, calendar_days};

const FILL_KEY: &str = "benchmark";

/// Replays the owner's BUY contributions against a benchmark index: each
/// buy's reporting-currency amount purchases phantom index units at that
/// day's forward-filled benchmark price, held forever. Sells are ignored
/// on purpose; the line answers "what if every contribution had bought the
/// index instead".
pub fn build_benchmark_series(
    transactions: &[Transaction],
    index_prices: &PriceSeries,
    end: NaiveDate,
) -> Vec<BenchmarkPoint> {
    let mut contributions: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for transaction in transactions.iter().filter(|t| t.is_buy()) {
        *contributions.entry(*transaction.date()).or_default() += transaction.amount_reporting();
    }
    let Some(start) = contributions.keys().next().copied() else {
        return Vec::new();
    };

    let mut fill = ForwardFill::new();
    let mut units = Decimal::ZERO;
    let mut pending_cash = Decimal::ZERO;
    let mut series = Vec::new();

    for day in calendar_days(start, end) {
        let price = fill.price_on(FILL_KEY, day, index_prices);

        if let Some(cash) = contributions.get(&day) {
            pending_cash += *cash;
            if price.is_none() {
                warn!(
                    "No benchmark price on or before {}, holding contribution as pending cash",
                    day
                );
            }
        }

        if let Some(price) = price {
            if pending_cash > Decimal::ZERO && price > Decimal::ZERO {
                units += pending_cash / price;
                pending_cash = Decimal::ZERO;
            }
            if units > Decimal::ZERO {
                series.push(BenchmarkPoint::new(day, units, units * price));
            }
        }
    }

    series
}
