use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;

use crate::models::{Holding, Transaction};

/// Collapses an owner's transaction list into current positions, one per
/// symbol. Symbols whose quantity nets to zero or below are fully closed
/// and omitted. Pure function over the transaction log; calling it twice
/// on the same input yields identical output.
pub fn aggregate_holdings(transactions: &[Transaction]) -> Vec<Holding> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| a.date().cmp(b.date()).then(a.id().cmp(b.id())));

    let mut by_symbol: HashMap<String, Vec<Transaction>> = HashMap::new();
    for transaction in sorted {
        by_symbol
            .entry(transaction.symbol().clone())
            .or_default()
            .push(transaction);
    }

    let mut holdings: Vec<Holding> = by_symbol
        .into_iter()
        .filter_map(|(symbol, group)| aggregate_symbol(&symbol, group))
        .collect();
    holdings.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    holdings
}

fn aggregate_symbol(symbol: &str, transactions: Vec<Transaction>) -> Option<Holding> {
    let buys: Vec<&Transaction> = transactions.iter().filter(|t| t.is_buy()).collect();
    let total_bought: Decimal = buys.iter().map(|t| *t.quantity()).sum();
    let total_sold: Decimal = transactions
        .iter()
        .filter(|t| t.is_sell())
        .map(|t| *t.quantity())
        .sum();

    let current = total_bought - total_sold;
    if current <= Decimal::ZERO {
        return None;
    }
    if buys.is_empty() || total_bought <= Decimal::ZERO {
        warn!(
            "Symbol {} has sells but no buy transactions, omitting holding",
            symbol
        );
        return None;
    }

    let mut price_weight = Decimal::ZERO;
    let mut rate_weight = Decimal::ZERO;
    let mut invested_full = Decimal::ZERO;
    for buy in &buys {
        price_weight += buy.effective_price() * buy.quantity();
        rate_weight += *buy.exchange_rate() * buy.quantity();
        invested_full += buy.amount_reporting();
    }

    let avg_buy_price = price_weight / total_bought;
    let avg_exchange_rate = rate_weight / total_bought;
    // Cost basis shrinks proportionally for units already sold.
    let invested = invested_full * (current / total_bought);

    let first_buy = buys[0];
    Some(Holding::new(
        symbol.to_string(),
        first_buy.name().clone(),
        *first_buy.asset_type(),
        first_buy.currency().clone(),
        current,
        avg_buy_price,
        avg_exchange_rate,
        invested,
        transactions,
        None,
        None,
        None,
        None,
        None,
        None,
    ))
}
