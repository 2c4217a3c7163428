use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::{AssetType, Transaction};

/// One ticker's net current position, derived from its transaction list on
/// every read and never persisted. Live fields stay `None` until a quote
/// has been merged in.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct Holding {
    symbol: String,
    name: String,
    asset_type: AssetType,
    currency: String,
    quantity: Decimal,
    avg_buy_price: Decimal,
    avg_exchange_rate: Decimal,
    invested: Decimal,
    transactions: Vec<Transaction>,
    current_price: Option<Decimal>,
    current_rate: Option<Decimal>,
    market_value: Option<Decimal>,
    day_change_percent: Option<Decimal>,
    unrealized_gain: Option<Decimal>,
    unrealized_gain_percent: Option<Decimal>,
}

impl Holding {
    /// Market value when live data is present, cost basis otherwise.
    pub fn value_or_cost(&self) -> Decimal {
        self.market_value.unwrap_or(self.invested)
    }
}
