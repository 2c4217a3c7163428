#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::models::{AssetType, PriceSeries, Transaction, TransactionType};
    use crate::portfolio::benchmark::build_benchmark_series;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn trade(
        id: i64,
        transaction_type: TransactionType,
        on: &str,
        quantity: Decimal,
        price: Decimal,
        rate: Decimal,
    ) -> Transaction {
        Transaction::new(
            id,
            String::from("owner-1"),
            String::from("AAPL.US"),
            None,
            String::from("Apple Inc."),
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

    fn index(points: &[(&str, Decimal)]) -> PriceSeries {
        points.iter().map(|(day, price)| (date(day), *price)).collect()
    }

    #[test]
    fn contributions_buy_phantom_units_at_that_days_price() {
        // 10 * 100 * 1.0 = 1000 PLN at an index price of 500 -> 2 units.
        let transactions = vec![trade(1, TransactionType::Buy, "2024-01-01", dec!(10), dec!(100), dec!(1.0))];
        let prices = index(&[("2024-01-01", dec!(500)), ("2024-01-10", dec!(550))]);

        let series = build_benchmark_series(&transactions, &prices, date("2024-01-10"));

        assert_eq!(series.len(), 10);
        assert_eq!(*series[0].units(), dec!(2));
        assert_eq!(*series[0].value(), dec!(1000));
        // Gap days hold the last known price.
        assert_eq!(*series[4].value(), dec!(1000));
        assert_eq!(*series[9].value(), dec!(1100));
    }

    #[test]
    fn sells_are_ignored_by_design() {
        let buys_only = vec![trade(1, TransactionType::Buy, "2024-01-01", dec!(10), dec!(100), dec!(1.0))];
        let mut with_sell = buys_only.clone();
        with_sell.push(trade(2, TransactionType::Sell, "2024-01-05", dec!(10), dec!(120), dec!(1.0)));

        let prices = index(&[("2024-01-01", dec!(500))]);
        let a = build_benchmark_series(&buys_only, &prices, date("2024-01-08"));
        let b = build_benchmark_series(&with_sell, &prices, date("2024-01-08"));
        assert_eq!(a, b);
    }

    #[test]
    fn contribution_before_any_price_waits_for_the_first_quote() {
        let transactions = vec![trade(1, TransactionType::Buy, "2024-01-01", dec!(10), dec!(100), dec!(1.0))];
        let prices = index(&[("2024-01-03", dec!(250))]);

        let series = build_benchmark_series(&transactions, &prices, date("2024-01-04"));

        // No points until the cash could be converted on Jan 3.
        assert_eq!(*series[0].date(), date("2024-01-03"));
        assert_eq!(*series[0].units(), dec!(4));
        assert_eq!(*series[0].value(), dec!(1000));
    }

    #[test]
    fn multiple_buys_accumulate_units() {
        let transactions = vec![
            trade(1, TransactionType::Buy, "2024-01-01", dec!(10), dec!(100), dec!(1.0)),
            trade(2, TransactionType::Buy, "2024-01-03", dec!(5), dec!(110), dec!(1.0)),
        ];
        let prices = index(&[("2024-01-01", dec!(500)), ("2024-01-03", dec!(550))]);

        let series = build_benchmark_series(&transactions, &prices, date("2024-01-03"));

        // 2 units, then 550 PLN buys 1 more at 550.
        assert_eq!(*series[2].units(), dec!(3));
        assert_eq!(*series[2].value(), dec!(1650));
    }
}
