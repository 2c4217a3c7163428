use std::collections::HashMap;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{DailySeriesPoint, PriceMap, Transaction, TransactionType};
use crate::portfolio::replay::{ForwardFill, calendar_days, transactions_by_date};

/// Running position of one symbol during the replay.
#[derive(Clone, Debug, Default)]
struct TickerState {
    quantity: Decimal,
    invested: Decimal,
    avg_rate: Decimal,
}

impl TickerState {
    /// The weighted-average rate is updated with the pre-transaction cost
    /// basis as the weight, so the result depends on chronological order.
    /// This intentionally matches the final-day holdings aggregate only at
    /// the end of the series, not on intermediate days.
    fn apply_buy(&mut self, transaction: &Transaction) {
        let cost = transaction.amount_reporting();
        let new_invested = self.invested + cost;
        if new_invested > Decimal::ZERO {
            self.avg_rate =
                (self.avg_rate * self.invested + *transaction.exchange_rate() * cost) / new_invested;
        }
        self.invested = new_invested;
        self.quantity += *transaction.quantity();
    }

    /// A sell reduces the cost basis by the same proportion it reduces the
    /// quantity.
    fn apply_sell(&mut self, transaction: &Transaction) {
        if self.quantity <= Decimal::ZERO {
            warn!(
                "Sell of {} on {} against an empty position, ignoring in replay",
                transaction.symbol(),
                transaction.date()
            );
            return;
        }
        let ratio = *transaction.quantity() / self.quantity;
        self.invested -= self.invested * ratio;
        self.quantity -= *transaction.quantity();
    }
}

/// Replays the full transaction history one calendar day at a time, from
/// the earliest transaction through `end`, valuing open positions at
/// forward-filled prices. Days with no cost basis (before the first
/// position, or after full liquidation of everything) produce no point.
/// Before any price has ever been seen for a symbol its cost basis stands
/// in for its value.
pub fn build_daily_series(
    transactions: &[Transaction],
    prices: &PriceMap,
    end: NaiveDate,
) -> Vec<DailySeriesPoint> {
    let by_date = transactions_by_date(transactions);
    let Some(start) = by_date.keys().next().copied() else {
        return Vec::new();
    };

    let mut states: HashMap<String, TickerState> = HashMap::new();
    let mut fill = ForwardFill::new();
    let mut series = Vec::new();

    for day in calendar_days(start, end) {
        if let Some(events) = by_date.get(&day) {
            for transaction in events {
                let state = states.entry(transaction.symbol().clone()).or_default();
                match transaction.transaction_type() {
                    TransactionType::Buy => state.apply_buy(transaction),
                    TransactionType::Sell => state.apply_sell(transaction),
                }
            }
        }

        let mut invested_total = Decimal::ZERO;
        let mut value_total = Decimal::ZERO;
        for (symbol, state) in &states {
            // Advance the fill cursor even for liquidated symbols so a
            // reopened position picks up the latest known price.
            let price = prices
                .get(symbol)
                .and_then(|series| fill.price_on(symbol, day, series));

            if state.quantity <= Decimal::ZERO {
                continue;
            }
            invested_total += state.invested;
            match price {
                Some(price) => value_total += price * state.quantity * state.avg_rate,
                None => value_total += state.invested,
            }
        }

        if invested_total > Decimal::ZERO {
            let profit = value_total - invested_total;
            let profit_percent = profit / invested_total * dec!(100);
            series.push(DailySeriesPoint::new(
                day,
                invested_total,
                value_total,
                profit,
                profit_percent,
            ));
        }
    }

    series
}
