use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;

use crate::api::{fmp, frank};
use crate::models::{PriceSeries, Quote};
use crate::portfolio::anomaly;

/// Injected market-data contract, independent of any concrete vendor.
/// `historical_daily` returns a sparse series; gaps on weekends and
/// holidays are expected and handled downstream by forward-filling.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Live quote, or `None` when the symbol is unknown upstream.
    async fn quote(&self, symbol: &str) -> Result<Option<Quote>>;

    /// Daily closing prices for the date range, both endpoints inclusive.
    async fn historical_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;

    /// Rate converting `currency` into the reporting currency. With a date
    /// the lookup is historical, tolerating up to three days of walk-back
    /// around weekends; without one it is the latest rate.
    async fn fx_rate(&self, currency: &str, date: Option<NaiveDate>) -> Result<Decimal>;
}

/// FMP-backed quotes and price history, Frankfurter-backed FX.
pub struct FmpMarketData {
    client: Client,
    api_key: String,
    reporting_currency: String,
}

impl FmpMarketData {
    pub fn new(api_key: String, reporting_currency: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            reporting_currency,
        }
    }
}

#[async_trait]
impl MarketDataSource for FmpMarketData {
    async fn quote(&self, symbol: &str) -> Result<Option<Quote>> {
        let quotes = match fmp::get_quote(symbol, &self.client, &self.api_key).await {
            Ok(quotes) => quotes,
            Err(err) => {
                debug!("No quote for {}: {}", symbol, err);
                return Ok(None);
            }
        };
        let Some(first) = quotes.first() else {
            return Ok(None);
        };

        // The quote endpoint does not carry a currency; the symbol search
        // does.
        let currency = match fmp::search_symbol(symbol, &self.client, &self.api_key).await {
            Ok(results) => results
                .first()
                .map(|r| r.currency().clone())
                .unwrap_or_else(|| self.reporting_currency.clone()),
            Err(err) => {
                warn!(
                    "Symbol search failed for {}, assuming {}: {}",
                    symbol, self.reporting_currency, err
                );
                self.reporting_currency.clone()
            }
        };

        Ok(Some(Quote::new(
            first.symbol().clone(),
            *first.price(),
            currency,
            *first.change_percentage(),
            Some(*first.previous_close()),
        )))
    }

    async fn historical_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        let rows = fmp::get_eod_history(symbol, start, end, &self.client, &self.api_key).await?;

        let mut series = PriceSeries::new();
        for row in rows {
            match NaiveDate::parse_from_str(row.date(), "%Y-%m-%d") {
                Ok(date) => {
                    series.insert(date, *row.price());
                }
                Err(err) => warn!(
                    "Skipping {} price row with unparseable date '{}': {}",
                    symbol,
                    row.date(),
                    err
                ),
            }
        }
        Ok(series)
    }

    async fn fx_rate(&self, currency: &str, date: Option<NaiveDate>) -> Result<Decimal> {
        let from = anomaly::normalize_currency_code(currency);
        if from == self.reporting_currency {
            return Ok(Decimal::ONE);
        }
        match date {
            Some(date) => {
                frank::get_rate_with_tolerance(from, &self.reporting_currency, date, &self.client)
                    .await
            }
            None => frank::get_forex_latest(from, &self.reporting_currency, &self.client).await,
        }
    }
}
