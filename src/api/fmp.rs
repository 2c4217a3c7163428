use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Client;

use crate::api::{
    fmp_dto::{FmpEodDto, FmpQuoteDto, FmpSearchSymbolDto},
    utils::{make_request, parse_response_array},
};

const BASE_URL: &str = "https://financialmodelingprep.com/stable";

pub async fn get_quote(symbol: &str, client: &Client, api_key: &str) -> Result<Vec<FmpQuoteDto>> {
    let params = format!("symbol={}&apikey={}", symbol, api_key);
    let res = make_request(client, BASE_URL, "quote", &params).await?;
    parse_response_array::<FmpQuoteDto>(res, &format!("No quote for symbol {}", symbol))
}

pub async fn search_symbol(
    symbol: &str,
    client: &Client,
    api_key: &str,
) -> Result<Vec<FmpSearchSymbolDto>> {
    let params = format!("query={}&limit=1&apikey={}", symbol, api_key);
    let res = make_request(client, BASE_URL, "search-symbol", &params).await?;
    parse_response_array::<FmpSearchSymbolDto>(res, &format!("No results for symbol {}", symbol))
}

pub async fn get_eod_history(
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    client: &Client,
    api_key: &str,
) -> Result<Vec<FmpEodDto>> {
    let params = format!(
        "symbol={}&from={}&to={}&apikey={}",
        symbol,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
        api_key
    );
    let res = make_request(client, BASE_URL, "historical-price-eod/light", &params).await?;
    parse_response_array::<FmpEodDto>(res, &format!("No price history for symbol {}", symbol))
}
