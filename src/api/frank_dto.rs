use std::collections::HashMap;

use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Frankfurter rate response. Only the rate table and its quote date are
/// kept; the echoed query parameters are ignored on deserialization.
#[derive(Debug, Deserialize, Getters)]
pub struct FrankForexDto {
    date: String,
    rates: HashMap<String, Decimal>,
}
