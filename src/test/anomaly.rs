#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::portfolio::anomaly::{
        normalize_currency_code, normalize_price, suggest_price_multiplier,
    };

    #[test]
    fn pence_prices_convert_to_pounds() {
        let (price, currency) = normalize_price(dec!(15000), "GBX");
        assert_eq!(price, dec!(150));
        assert_eq!(currency, "GBP");

        let (price, currency) = normalize_price(dec!(1234), "GBp");
        assert_eq!(price, dec!(12.34));
        assert_eq!(currency, "GBP");
    }

    #[test]
    fn major_unit_prices_pass_through() {
        let (price, currency) = normalize_price(dec!(99.5), "USD");
        assert_eq!(price, dec!(99.5));
        assert_eq!(currency, "USD");
        assert_eq!(normalize_currency_code("PLN"), "PLN");
        assert_eq!(normalize_currency_code("ZAc"), "ZAR");
    }

    #[test]
    fn hundredfold_entry_suggests_a_corrective_multiplier() {
        // Entered in pence against a pounds reference.
        assert_eq!(suggest_price_multiplier(dec!(15000), dec!(150)), Some(dec!(0.01)));
        // Entered in pounds against a pence reference.
        assert_eq!(suggest_price_multiplier(dec!(1.5), dec!(150)), Some(dec!(100)));
    }

    #[test]
    fn plausible_prices_are_left_alone() {
        assert_eq!(suggest_price_multiplier(dec!(140), dec!(150)), None);
        assert_eq!(suggest_price_multiplier(dec!(0), dec!(150)), None);
        assert_eq!(suggest_price_multiplier(dec!(150), dec!(0)), None);
    }
}
