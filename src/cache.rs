use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BenchmarkPoint, DailySeriesPoint, PriceMap, PriceSeries};

/// Opaque read-through key-value cache with explicit invalidation. Entries
/// are JSON strings so the storage medium stays interchangeable.
pub trait SideCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Cached portfolio history: the full derived price map is kept alongside
/// the series so an incremental extension only fetches prices for days
/// after `through`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SeriesCacheEntry {
    pub through: NaiveDate,
    pub prices: PriceMap,
    pub series: Vec<DailySeriesPoint>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BenchmarkCacheEntry {
    pub through: NaiveDate,
    pub prices: PriceSeries,
    pub series: Vec<BenchmarkPoint>,
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SideCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
