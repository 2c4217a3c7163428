use std::str::FromStr;

use anyhow::{Context, Error, Result};
use chrono::NaiveDate;
use csv::Reader;
use derive_getters::Getters;
use derive_new::new;
use log::warn;
use rust_decimal::Decimal;

use crate::models::{AssetType, TransactionType};

/// One parsed CSV row, before the historical FX rate has been resolved.
#[derive(Clone, Debug, Getters, new)]
pub struct CsvTrade {
    date: NaiveDate,
    transaction_type: TransactionType,
    symbol: String,
    name: String,
    asset_type: AssetType,
    quantity: Decimal,
    price: Decimal,
    currency: String,
    fees: Option<Decimal>,
    broker: Option<String>,
}

fn parse_decimal(field: &str, field_name: &str, row_idx: usize) -> Result<Decimal> {
    field
        .parse::<Decimal>()
        .with_context(|| format!("Failed to parse {} '{}' at row {}", field_name, field, row_idx))
}

/// Reads trades from a CSV file with columns:
/// date,type,symbol,name,asset_type,quantity,price,currency,fees,broker.
/// Rows with an unknown transaction or asset type are skipped with a
/// warning; malformed numeric fields fail the whole import.
pub fn read_trades(path: &str) -> Result<Vec<CsvTrade>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file at path: {}", path))?;

    let mut trades = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let row_no = row_idx + 1;
        let rec = record.with_context(|| format!("Failed to read CSV record at row {}", row_no))?;

        if rec.len() < 10 {
            return Err(Error::msg(format!(
                "Invalid CSV format at row {}: expected at least 10 columns, found {}",
                row_no,
                rec.len()
            )));
        }

        let date = NaiveDate::parse_from_str(&rec[0], "%Y-%m-%d")
            .with_context(|| format!("Failed to parse date '{}' at row {}", &rec[0], row_no))?;

        let transaction_type = match TransactionType::from_str(&rec[1]) {
            Ok(transaction_type) => transaction_type,
            Err(_) => {
                warn!(
                    "Skipping unknown transaction type '{}' at row {}",
                    &rec[1], row_no
                );
                continue;
            }
        };

        let asset_type = match AssetType::from_str(&rec[4]) {
            Ok(asset_type) => asset_type,
            Err(_) => {
                warn!("Skipping unknown asset type '{}' at row {}", &rec[4], row_no);
                continue;
            }
        };

        let quantity = parse_decimal(&rec[5], "quantity", row_no)?;
        let price = parse_decimal(&rec[6], "price", row_no)?;
        let fees = if rec[8].is_empty() {
            None
        } else {
            Some(parse_decimal(&rec[8], "fees", row_no)?)
        };
        let broker = if rec[9].is_empty() {
            None
        } else {
            Some(rec[9].to_string())
        };

        trades.push(CsvTrade::new(
            date,
            transaction_type,
            rec[2].to_string(),
            rec[3].to_string(),
            asset_type,
            quantity,
            price,
            rec[7].to_string(),
            fees,
            broker,
        ));
    }

    Ok(trades)
}
