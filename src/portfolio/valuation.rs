use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Holding;
use crate::portfolio::anomaly;

/// Merges a live quote and FX rate into a holding. Pure and idempotent;
/// sub-unit quote currencies (e.g. pence) are normalized before valuing.
pub fn merge_live(
    holding: &Holding,
    quote_price: Decimal,
    quote_currency: &str,
    fx_rate: Decimal,
    day_change_percent: Decimal,
) -> Holding {
    let (price, _) = anomaly::normalize_price(quote_price, quote_currency);
    let market_value = *holding.quantity() * price * fx_rate;
    let unrealized_gain = market_value - holding.invested();
    let unrealized_gain_percent = if *holding.invested() > Decimal::ZERO {
        unrealized_gain / holding.invested() * dec!(100)
    } else {
        Decimal::ZERO
    };

    Holding::new(
        holding.symbol().clone(),
        holding.name().clone(),
        *holding.asset_type(),
        holding.currency().clone(),
        *holding.quantity(),
        *holding.avg_buy_price(),
        *holding.avg_exchange_rate(),
        *holding.invested(),
        holding.transactions().clone(),
        Some(price),
        Some(fx_rate),
        Some(market_value),
        Some(day_change_percent),
        Some(unrealized_gain),
        Some(unrealized_gain_percent),
    )
}
