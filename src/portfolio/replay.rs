use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{PriceSeries, Transaction};

/// Every calendar day from `start` through `end`, both inclusive. Weekends
/// are not skipped; prices are forward-filled through them instead.
pub fn calendar_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |day| day.checked_add_days(Days::new(1)))
        .take_while(move |day| *day <= end)
}

/// Transactions grouped by date, ascending. Same-date entries keep id
/// order so a replay is reproducible across runs.
pub fn transactions_by_date(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Vec<&Transaction>> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| a.date().cmp(b.date()).then(a.id().cmp(b.id())));

    let mut by_date: BTreeMap<NaiveDate, Vec<&Transaction>> = BTreeMap::new();
    for transaction in sorted {
        by_date.entry(*transaction.date()).or_default().push(transaction);
    }
    by_date
}

/// Per-key forward-fill cursor over sparse daily price series. An exact
/// date hit becomes the new last-known price; a miss reuses the last-known
/// one. Yields nothing until any price has been seen for the key.
#[derive(Debug, Default)]
pub struct ForwardFill {
    last_known: HashMap<String, Decimal>,
}

impl ForwardFill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price_on(&mut self, key: &str, date: NaiveDate, series: &PriceSeries) -> Option<Decimal> {
        if let Some(price) = series.get(&date) {
            self.last_known.insert(key.to_string(), *price);
            return Some(*price);
        }
        self.last_known.get(key).copied()
    }
}
