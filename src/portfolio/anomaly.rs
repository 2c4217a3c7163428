use std::collections::HashMap;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Conversion rule for a currency quoted in a minor unit.
#[derive(Clone, Debug)]
pub struct SubUnitRule {
    pub major_code: &'static str,
    pub factor: Decimal,
}

static SUB_UNIT_RULES: OnceLock<HashMap<&'static str, SubUnitRule>> = OnceLock::new();

fn rules() -> &'static HashMap<&'static str, SubUnitRule> {
    SUB_UNIT_RULES.get_or_init(|| {
        let mut map = HashMap::new();
        let pence = SubUnitRule {
            major_code: "GBP",
            factor: dec!(0.01),
        };
        map.insert("GBX", pence.clone());
        map.insert("GBp", pence);
        let cents = SubUnitRule {
            major_code: "ZAR",
            factor: dec!(0.01),
        };
        map.insert("ZAc", cents.clone());
        map.insert("ZAC", cents);
        map.insert(
            "ILA",
            SubUnitRule {
                major_code: "ILS",
                factor: dec!(0.01),
            },
        );
        map
    })
}

/// Converts a price quoted in a minor unit (pence, cents, agorot) into its
/// major unit and returns the major currency code. Prices already in a
/// major unit pass through unchanged.
pub fn normalize_price(price: Decimal, currency: &str) -> (Decimal, &str) {
    match rules().get(currency) {
        Some(rule) => (price * rule.factor, rule.major_code),
        None => (price, currency),
    }
}

/// Major currency code for FX lookups, without touching the amount.
pub fn normalize_currency_code(currency: &str) -> &str {
    match rules().get(currency) {
        Some(rule) => rule.major_code,
        None => currency,
    }
}

/// Flags a likely sub-unit data-entry error: an entered price roughly two
/// orders of magnitude off a reference quote for the same instrument.
/// Returns the corrective multiplier to store on the transaction.
pub fn suggest_price_multiplier(entered: Decimal, reference: Decimal) -> Option<Decimal> {
    if entered <= Decimal::ZERO || reference <= Decimal::ZERO {
        return None;
    }
    let ratio = entered / reference;
    if ratio >= dec!(50) && ratio <= dec!(200) {
        Some(dec!(0.01))
    } else if ratio >= dec!(0.005) && ratio <= dec!(0.02) {
        Some(dec!(100))
    } else {
        None
    }
}
