use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// One recorded trade. Price, quantity and the exchange rate into the
/// reporting currency are historical facts captured at trade time and are
/// never recomputed afterwards.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Transaction {
    id: i64,
    owner_id: String,
    symbol: String,
    isin: Option<String>,
    name: String,
    asset_type: AssetType,
    transaction_type: TransactionType,
    date: NaiveDate,
    quantity: Decimal,
    price: Decimal,
    currency: String,
    exchange_rate: Decimal,
    fees: Option<Decimal>,
    broker: Option<String>,
    notes: Option<String>,
    price_multiplier: Option<Decimal>,
}

impl Transaction {
    /// Entered price with any sub-unit correction applied.
    pub fn effective_price(&self) -> Decimal {
        match self.price_multiplier {
            Some(multiplier) => self.price * multiplier,
            None => self.price,
        }
    }

    /// Trade value in the reporting currency at the snapshot rate.
    pub fn amount_reporting(&self) -> Decimal {
        self.effective_price() * self.quantity * self.exchange_rate
    }

    pub fn is_buy(&self) -> bool {
        self.transaction_type == TransactionType::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.transaction_type == TransactionType::Sell
    }
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, IntoStaticStr, PartialEq, Serialize,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, IntoStaticStr, PartialEq, Serialize,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum AssetType {
    Stock,
    Etf,
    Crypto,
    Bond,
    Commodity,
}
