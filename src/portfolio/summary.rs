use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{ClosedPosition, Holding, PortfolioSummary};

/// Rolls up live-merged holdings and the realized ledger into dashboard
/// totals. The aggregate day change is derived by reconstructing each
/// holding's previous-day value from its own day-change percent and
/// summing those, which stays correct when holdings move in opposite
/// directions. Holdings without live data count at cost basis, flat.
pub fn summarize(holdings: &[Holding], closed: &[ClosedPosition]) -> PortfolioSummary {
    let mut value = Decimal::ZERO;
    let mut invested = Decimal::ZERO;
    let mut previous_value = Decimal::ZERO;

    for holding in holdings {
        let current = holding.value_or_cost();
        value += current;
        invested += *holding.invested();

        let day_change = holding.day_change_percent().unwrap_or(Decimal::ZERO);
        let denominator = dec!(1) + day_change / dec!(100);
        previous_value += if denominator != Decimal::ZERO {
            current / denominator
        } else {
            current
        };
    }

    let unrealized_gain = value - invested;
    let realized_gain: Decimal = closed.iter().map(|c| *c.realized_profit()).sum();
    let total_gain = unrealized_gain + realized_gain;
    let total_gain_percent = if invested > Decimal::ZERO {
        total_gain / invested * dec!(100)
    } else {
        Decimal::ZERO
    };
    let day_change_percent = if previous_value > Decimal::ZERO {
        (value - previous_value) / previous_value * dec!(100)
    } else {
        Decimal::ZERO
    };

    PortfolioSummary::new(
        value,
        invested,
        unrealized_gain,
        realized_gain,
        total_gain,
        total_gain_percent,
        day_change_percent,
    )
}
