use log::warn;

use crate::models::{ClosedPosition, Transaction};
use crate::portfolio::holdings::aggregate_holdings;

/// Books the realized profit of a SELL against the weighted-average cost
/// basis of the holding as it stood before the sale. `prior` must not
/// contain the sell itself. Returns `None` when no open holding exists for
/// the symbol; the sell is still recorded, only the ledger entry is
/// skipped.
pub fn realize_sale(prior: &[Transaction], sell: &Transaction) -> Option<ClosedPosition> {
    let holding = match aggregate_holdings(prior)
        .into_iter()
        .find(|h| h.symbol() == sell.symbol())
    {
        Some(holding) => holding,
        None => {
            warn!(
                "Sell of {} x {} on {} has no matching open holding, skipping realized P/L",
                sell.quantity(),
                sell.symbol(),
                sell.date()
            );
            return None;
        }
    };

    let quantity = *sell.quantity();
    let cost_basis = quantity * holding.avg_buy_price() * holding.avg_exchange_rate();
    let sale_value = quantity * sell.effective_price() * sell.exchange_rate();

    Some(ClosedPosition::new(
        0,
        sell.owner_id().clone(),
        *sell.id(),
        sell.symbol().clone(),
        quantity,
        *holding.avg_buy_price(),
        *holding.avg_exchange_rate(),
        sell.effective_price(),
        *sell.exchange_rate(),
        sale_value - cost_basis,
        *sell.date(),
        sell.broker().clone(),
    ))
}
