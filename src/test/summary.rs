#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::models::{AssetType, ClosedPosition, Holding};
    use crate::portfolio::summary::summarize;

    fn live_holding(symbol: &str, invested: Decimal, value: Decimal, day_change: Decimal) -> Holding {
        Holding::new(
            symbol.to_string(),
            symbol.to_string(),
            AssetType::Stock,
            String::from("USD"),
            dec!(1),
            dec!(1),
            dec!(1),
            invested,
            Vec::new(),
            Some(value),
            Some(dec!(1)),
            Some(value),
            Some(day_change),
            Some(value - invested),
            None,
        )
    }

    fn flat_holding(symbol: &str, invested: Decimal) -> Holding {
        Holding::new(
            symbol.to_string(),
            symbol.to_string(),
            AssetType::Stock,
            String::from("USD"),
            dec!(1),
            dec!(1),
            dec!(1),
            invested,
            Vec::new(),
            None,
            None,
            None,
            None,
            None,
            None,
        )
    }

    fn closed(profit: Decimal) -> ClosedPosition {
        ClosedPosition::new(
            1,
            String::from("owner-1"),
            9,
            String::from("TSLA.US"),
            dec!(1),
            dec!(100),
            dec!(4.0),
            dec!(110),
            dec!(4.0),
            profit,
            chrono::NaiveDate::parse_from_str("2024-03-01", "%Y-%m-%d").unwrap(),
            None,
        )
    }

    #[test]
    fn day_change_uses_each_holdings_own_inversion() {
        // A closed yesterday at 100 and is up 10%, B closed at 100 and is
        // down 5%: portfolio moved from 200 to 205.
        let holdings = vec![
            live_holding("A", dec!(90), dec!(110), dec!(10)),
            live_holding("B", dec!(90), dec!(95), dec!(-5)),
        ];
        let summary = summarize(&holdings, &[]);

        assert_eq!(*summary.value(), dec!(205));
        assert_eq!(summary.day_change_percent().round_dp(2), dec!(2.50));
    }

    #[test]
    fn holdings_without_live_data_count_at_cost_basis() {
        let holdings = vec![
            live_holding("A", dec!(100), dec!(120), dec!(0)),
            flat_holding("B", dec!(50)),
        ];
        let summary = summarize(&holdings, &[]);

        assert_eq!(*summary.value(), dec!(170));
        assert_eq!(*summary.invested(), dec!(150));
        assert_eq!(*summary.unrealized_gain(), dec!(20));
    }

    #[test]
    fn realized_profit_adds_into_total_return() {
        let holdings = vec![live_holding("A", dec!(100), dec!(120), dec!(0))];
        let summary = summarize(&holdings, &[closed(dec!(40)), closed(dec!(10))]);

        assert_eq!(*summary.realized_gain(), dec!(50));
        assert_eq!(*summary.total_gain(), dec!(70));
        assert_eq!(summary.total_gain_percent().round_dp(2), dec!(70.00));
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        let summary = summarize(&[], &[]);
        assert_eq!(*summary.value(), Decimal::ZERO);
        assert_eq!(*summary.day_change_percent(), Decimal::ZERO);
    }
}
