#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::models::{AssetType, PriceMap, Transaction, TransactionType};
    use crate::portfolio::history::build_daily_series;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn trade(
        id: i64,
        transaction_type: TransactionType,
        symbol: &str,
        on: &str,
        quantity: Decimal,
        price: Decimal,
        rate: Decimal,
    ) -> Transaction {
        Transaction::new(
            id,
            String::from("owner-1"),
            symbol.to_string(),
            None,
            symbol.to_string(),
            AssetType::Stock,
            transaction_type,
            date(on),
            quantity,
            price,
            String::from("USD"),
            rate,
            None,
            None,
            None,
            None,
        )
    }

    fn prices(symbol: &str, points: &[(&str, Decimal)]) -> PriceMap {
        let mut map = PriceMap::new();
        let series = map.entry(symbol.to_string()).or_default();
        for (day, price) in points {
            series.insert(date(day), *price);
        }
        map
    }

    #[test]
    fn gaps_forward_fill_from_the_last_known_price() {
        let transactions = vec![trade(
            1,
            TransactionType::Buy,
            "AAPL.US",
            "2024-01-01",
            dec!(1),
            dec!(100),
            dec!(1.0),
        )];
        // Three missing days between two known prices.
        let prices = prices("AAPL.US", &[("2024-01-01", dec!(100)), ("2024-01-05", dec!(110))]);

        let series = build_daily_series(&transactions, &prices, date("2024-01-05"));

        assert_eq!(series.len(), 5);
        for point in &series[1..4] {
            assert_eq!(*point.value(), dec!(100));
        }
        assert_eq!(*series[4].value(), dec!(110));
        assert_eq!(*series[4].profit(), dec!(10));
    }

    #[test]
    fn no_points_before_the_first_transaction() {
        let transactions = vec![trade(
            1,
            TransactionType::Buy,
            "AAPL.US",
            "2024-01-03",
            dec!(1),
            dec!(100),
            dec!(1.0),
        )];
        let prices = prices("AAPL.US", &[("2024-01-01", dec!(90)), ("2024-01-03", dec!(100))]);

        let series = build_daily_series(&transactions, &prices, date("2024-01-05"));

        assert_eq!(*series[0].date(), date("2024-01-03"));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn cost_basis_stands_in_before_any_price_exists() {
        let transactions = vec![trade(
            1,
            TransactionType::Buy,
            "OBSCURE.WA",
            "2024-01-01",
            dec!(2),
            dec!(50),
            dec!(1.0),
        )];

        let series = build_daily_series(&transactions, &PriceMap::new(), date("2024-01-03"));

        for point in &series {
            assert_eq!(*point.value(), dec!(100));
            assert_eq!(*point.profit(), Decimal::ZERO);
        }
    }

    #[test]
    fn buy_weighted_rate_update_uses_the_pre_transaction_cost_basis() {
        let transactions = vec![
            trade(1, TransactionType::Buy, "AAPL.US", "2024-01-01", dec!(10), dec!(100), dec!(4.0)),
            trade(2, TransactionType::Buy, "AAPL.US", "2024-01-02", dec!(5), dec!(120), dec!(4.1)),
        ];
        let prices = prices("AAPL.US", &[("2024-01-01", dec!(100)), ("2024-01-02", dec!(120))]);

        let series = build_daily_series(&transactions, &prices, date("2024-01-02"));

        // Cost-weighted, order-dependent: (4.0*4000 + 4.1*2460) / 6460,
        // which differs from the quantity-weighted 60.5/15.
        let expected_rate = (dec!(4.0) * dec!(4000) + dec!(4.1) * dec!(2460)) / dec!(6460);
        let expected_value = dec!(15) * dec!(120) * expected_rate;
        assert_eq!(series[1].value().round_dp(6), expected_value.round_dp(6));
        assert_eq!(*series[1].invested(), dec!(6460));
    }

    #[test]
    fn proportional_sell_and_continuation_while_other_symbols_stay_open() {
        let transactions = vec![
            trade(1, TransactionType::Buy, "A.US", "2024-01-01", dec!(10), dec!(10), dec!(1.0)),
            trade(2, TransactionType::Buy, "B.US", "2024-01-01", dec!(4), dec!(25), dec!(1.0)),
            // A fully liquidated mid-history.
            trade(3, TransactionType::Sell, "A.US", "2024-01-03", dec!(10), dec!(12), dec!(1.0)),
        ];
        let mut price_map = prices("A.US", &[("2024-01-01", dec!(10))]);
        price_map.extend(prices("B.US", &[("2024-01-01", dec!(25))]));

        let series = build_daily_series(&transactions, &price_map, date("2024-01-04"));

        // The series keeps running on B after A sells to zero.
        assert_eq!(series.len(), 4);
        assert_eq!(*series[3].invested(), dec!(100));
        assert_eq!(*series[3].value(), dec!(100));
    }

    #[test]
    fn empty_transaction_list_produces_no_series() {
        assert!(build_daily_series(&[], &PriceMap::new(), date("2024-01-04")).is_empty());
    }
}
