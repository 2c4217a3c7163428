use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// Top-level dashboard figures in the reporting currency.
#[derive(Clone, Debug, Default, Getters, PartialEq, new)]
pub struct PortfolioSummary {
    value: Decimal,
    invested: Decimal,
    unrealized_gain: Decimal,
    realized_gain: Decimal,
    total_gain: Decimal,
    total_gain_percent: Decimal,
    day_change_percent: Decimal,
}
