#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::cache::{MemoryCache, SeriesCacheEntry, SideCache};
    use crate::models::{DailySeriesPoint, PriceMap};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_entry() -> SeriesCacheEntry {
        let mut prices = PriceMap::new();
        let series = prices.entry(String::from("AAPL.US")).or_default();
        series.insert(date("2024-01-01"), dec!(100));
        series.insert(date("2024-01-05"), dec!(110.25));

        SeriesCacheEntry {
            through: date("2024-01-05"),
            prices,
            series: vec![
                DailySeriesPoint::new(date("2024-01-01"), dec!(400), dec!(400), dec!(0), dec!(0)),
                DailySeriesPoint::new(
                    date("2024-01-05"),
                    dec!(400),
                    dec!(441),
                    dec!(41),
                    dec!(10.25),
                ),
            ],
        }
    }

    #[test]
    fn series_entry_round_trips_through_json() {
        let entry = sample_entry();
        let raw = serde_json::to_string(&entry).unwrap();
        let reloaded: SeriesCacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry, reloaded);
    }

    #[test]
    fn memory_cache_get_set_remove() {
        let cache = MemoryCache::new();
        assert!(cache.get("k").is_none());

        cache.set("k", String::from("v1"));
        assert_eq!(cache.get("k").as_deref(), Some("v1"));

        cache.set("k", String::from("v2"));
        assert_eq!(cache.get("k").as_deref(), Some("v2"));

        cache.remove("k");
        assert!(cache.get("k").is_none());
    }
}
