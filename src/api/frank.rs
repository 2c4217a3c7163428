use anyhow::{Context, Result, anyhow};
use chrono::{Days, NaiveDate};
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;

use super::{
    frank_dto::FrankForexDto,
    utils::{make_request, parse_response_object},
};

const BASE_URL: &str = "https://api.frankfurter.app";

pub async fn get_forex_history(
    from_currency: &str,
    to_currency: &str,
    date: &str,
    client: &Client,
) -> Result<FrankForexDto> {
    let params = format!("from={}&to={}", from_currency, to_currency);
    let res = make_request(client, BASE_URL, date, &params).await?;
    parse_response_object::<FrankForexDto>(
        res,
        &format!(
            "No exchange rates for date {} from {} to {}",
            date, from_currency, to_currency
        ),
    )
}

pub async fn get_forex_latest(
    from_currency: &str,
    to_currency: &str,
    client: &Client,
) -> Result<Decimal> {
    let params = format!("from={}&to={}", from_currency, to_currency);
    let res = make_request(client, BASE_URL, "latest", &params).await?;
    let dto = parse_response_object::<FrankForexDto>(
        res,
        &format!(
            "No current exchange rate from {} to {}",
            from_currency, to_currency
        ),
    )?;
    dto.rates()
        .get(to_currency)
        .copied()
        .with_context(|| format!("Missing {} in exchange rate response", to_currency))
}

/// Historical rate with weekend tolerance: when the exact date has no
/// quote, walks back up to three calendar days.
pub async fn get_rate_with_tolerance(
    from_currency: &str,
    to_currency: &str,
    date: NaiveDate,
    client: &Client,
) -> Result<Decimal> {
    for offset in 0..=3u64 {
        let Some(day) = date.checked_sub_days(Days::new(offset)) else {
            break;
        };
        let formatted = day.format("%Y-%m-%d").to_string();
        match get_forex_history(from_currency, to_currency, &formatted, client).await {
            Ok(dto) => {
                if let Some(rate) = dto.rates().get(to_currency) {
                    return Ok(*rate);
                }
            }
            Err(err) => {
                debug!("No {}->{} rate on {}: {}", from_currency, to_currency, day, err);
            }
        }
    }
    Err(anyhow!(
        "No {}->{} rate within 3 days of {}",
        from_currency,
        to_currency,
        date
    ))
}
