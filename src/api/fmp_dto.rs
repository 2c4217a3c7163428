use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct FmpQuoteDto {
    symbol: String,
    name: String,
    price: Decimal,
    change_percentage: Decimal,
    change: Decimal,
    open: Decimal,
    previous_close: Decimal,
    timestamp: i64,
}

#[derive(Debug, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct FmpSearchSymbolDto {
    symbol: String,
    name: String,
    currency: String,
    exchange_full_name: String,
    exchange: String,
}

#[derive(Debug, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct FmpEodDto {
    symbol: String,
    date: String,
    price: Decimal,
    volume: Option<i64>,
}
