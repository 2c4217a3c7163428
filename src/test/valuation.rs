#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::models::{AssetType, Holding, Transaction, TransactionType};
    use crate::portfolio::valuation::merge_live;

    fn holding(quantity: Decimal, invested: Decimal) -> Holding {
        let buy = Transaction::new(
            1,
            String::from("owner-1"),
            String::from("AAPL.US"),
            None,
            String::from("Apple Inc."),
            AssetType::Stock,
            TransactionType::Buy,
            NaiveDate::parse_from_str("2024-01-01", "%Y-%m-%d").unwrap(),
            quantity,
            dec!(100),
            String::from("USD"),
            dec!(4.0),
            None,
            None,
            None,
            None,
        );
        Holding::new(
            String::from("AAPL.US"),
            String::from("Apple Inc."),
            AssetType::Stock,
            String::from("USD"),
            quantity,
            dec!(100),
            dec!(4.0),
            invested,
            vec![buy],
            None,
            None,
            None,
            None,
            None,
            None,
        )
    }

    #[test]
    fn merge_computes_value_and_unrealized_return() {
        let merged = merge_live(&holding(dec!(15), dec!(6460)), dec!(150), "USD", dec!(4.0), dec!(1.5));

        assert_eq!(merged.market_value().unwrap(), dec!(9000));
        assert_eq!(merged.unrealized_gain().unwrap(), dec!(2540));
        assert_eq!(
            merged.unrealized_gain_percent().unwrap().round_dp(2),
            dec!(39.32)
        );
        assert_eq!(merged.day_change_percent().unwrap(), dec!(1.5));
    }

    #[test]
    fn zero_cost_basis_never_yields_nan() {
        let merged = merge_live(&holding(dec!(1), dec!(0)), dec!(10), "USD", dec!(4.0), dec!(0));
        assert_eq!(merged.unrealized_gain_percent().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn merging_is_idempotent() {
        let base = holding(dec!(15), dec!(6460));
        let once = merge_live(&base, dec!(150), "USD", dec!(4.0), dec!(1.5));
        let twice = merge_live(&once, dec!(150), "USD", dec!(4.0), dec!(1.5));
        assert_eq!(once, twice);
    }

    #[test]
    fn pence_quotes_are_normalized_to_pounds() {
        let merged = merge_live(&holding(dec!(10), dec!(5000)), dec!(15000), "GBX", dec!(5.0), dec!(0));
        assert_eq!(merged.current_price().unwrap(), dec!(150.00));
        assert_eq!(merged.market_value().unwrap(), dec!(7500.00));
    }
}
