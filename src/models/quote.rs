use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Live quote as delivered by the market-data source, in the instrument's
/// own trading currency.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Quote {
    symbol: String,
    price: Decimal,
    currency: String,
    change_percent: Decimal,
    previous_close: Option<Decimal>,
}
