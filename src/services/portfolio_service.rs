use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveDate};
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::api::MarketDataSource;
use crate::cache::{BenchmarkCacheEntry, SeriesCacheEntry, SideCache};
use crate::db::{ClosedPositionStore, SnapshotStore, TransactionStore};
use crate::models::{
    BenchmarkPoint, ClosedPosition, DailySeriesPoint, Holding, PortfolioSnapshot,
    PortfolioSummary, PriceMap, Transaction,
};
use crate::portfolio::{anomaly, benchmark, history, holdings, realized, summary, valuation};
use crate::services::csv_import;

/// Manual quote refreshes are throttled to bound outbound call volume.
const REFRESH_COOLDOWN_MINUTES: i64 = 30;

/// Orchestration layer over the three external collaborators (transaction
/// store, market-data source, snapshot store) plus the side cache. All
/// aggregates are recomputed from the immutable transaction log on every
/// read; the only mutable state here is the cache bookkeeping.
pub struct PortfolioService {
    transactions: Arc<dyn TransactionStore>,
    closed_positions: Arc<dyn ClosedPositionStore>,
    snapshots: Arc<dyn SnapshotStore>,
    market_data: Arc<dyn MarketDataSource>,
    cache: Arc<dyn SideCache>,
    reporting_currency: String,
    /// Bumped on every transaction mutation; a series rebuild that raced
    /// with a mutation is discarded instead of cached.
    revision: AtomicU64,
    last_refresh: Mutex<Option<DateTime<Local>>>,
    benchmark_keys: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl PortfolioService {
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        closed_positions: Arc<dyn ClosedPositionStore>,
        snapshots: Arc<dyn SnapshotStore>,
        market_data: Arc<dyn MarketDataSource>,
        cache: Arc<dyn SideCache>,
        reporting_currency: String,
    ) -> Self {
        Self {
            transactions,
            closed_positions,
            snapshots,
            market_data,
            cache,
            reporting_currency,
            revision: AtomicU64::new(0),
            last_refresh: Mutex::new(None),
            benchmark_keys: Mutex::new(HashMap::new()),
        }
    }

    pub fn reporting_currency(&self) -> &str {
        &self.reporting_currency
    }

    fn series_cache_key(&self, owner_id: &str) -> String {
        format!("daily-series:{}", owner_id)
    }

    fn benchmark_cache_key(&self, owner_id: &str, benchmark_symbol: &str) -> String {
        format!("benchmark-series:{}:{}", owner_id, benchmark_symbol)
    }

    /// Total invalidation: the replay is order-sensitive and cheap to redo
    /// once new prices are fetched, so no partial invalidation is
    /// attempted.
    fn invalidate_caches(&self, owner_id: &str) {
        self.revision.fetch_add(1, Ordering::SeqCst);
        self.cache.remove(&self.series_cache_key(owner_id));
        if let Ok(mut keys) = self.benchmark_keys.lock() {
            if let Some(symbols) = keys.remove(owner_id) {
                for symbol in symbols {
                    self.cache.remove(&self.benchmark_cache_key(owner_id, &symbol));
                }
            }
        }
    }

    pub async fn transactions(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        self.transactions.list(owner_id).await
    }

    pub async fn closed_positions(&self, owner_id: &str) -> Result<Vec<ClosedPosition>> {
        self.closed_positions.list(owner_id).await
    }

    /// Records a trade. A SELL synchronously books its realized profit
    /// against the holding as it stood before the sale; if no holding
    /// exists the warning is logged and the transaction is still stored.
    pub async fn record_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        let prior = self.transactions.list(transaction.owner_id()).await?;
        let inserted = self.transactions.insert(&transaction).await?;

        if inserted.is_sell() {
            if let Some(position) = realized::realize_sale(&prior, &inserted) {
                self.closed_positions.insert(&position).await?;
            }
        }

        self.invalidate_caches(inserted.owner_id());
        Ok(inserted)
    }

    /// Applies an edit and re-books the realized ledger of every SELL on
    /// the affected symbols, so entries downstream of an edited BUY stay
    /// consistent with the new history.
    pub async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        let owner_id = transaction.owner_id();
        let previous_symbol = self
            .transactions
            .list(owner_id)
            .await?
            .into_iter()
            .find(|t| t.id() == transaction.id())
            .map(|t| t.symbol().clone());

        self.transactions.update(transaction).await?;

        let mut affected: BTreeSet<String> = BTreeSet::new();
        affected.insert(transaction.symbol().clone());
        if let Some(symbol) = previous_symbol {
            affected.insert(symbol);
        }

        // A SELL edited into a BUY keeps no ledger entry.
        self.closed_positions
            .delete_for_transaction(owner_id, *transaction.id())
            .await?;

        let all = self.transactions.list(owner_id).await?;
        for sell in all
            .iter()
            .filter(|t| t.is_sell() && affected.contains(t.symbol()))
        {
            self.closed_positions
                .delete_for_transaction(owner_id, *sell.id())
                .await?;
            let prior: Vec<Transaction> = all
                .iter()
                .filter(|t| {
                    t.date() < sell.date() || (t.date() == sell.date() && t.id() < sell.id())
                })
                .cloned()
                .collect();
            if let Some(position) = realized::realize_sale(&prior, sell) {
                self.closed_positions.insert(&position).await?;
            }
        }

        self.invalidate_caches(owner_id);
        Ok(())
    }

    /// Deletes a transaction together with any closed position it booked
    /// (single store transaction, no partial commit).
    pub async fn delete_transaction(&self, owner_id: &str, id: i64) -> Result<()> {
        self.transactions.delete(owner_id, id).await?;
        self.invalidate_caches(owner_id);
        Ok(())
    }

    /// Current holdings merged with live quotes and FX rates. Quote and FX
    /// fetches run concurrently; one symbol's failure degrades that
    /// holding to cost basis instead of aborting the batch, and a missing
    /// FX rate falls back to 1 with a warning.
    pub async fn holdings(&self, owner_id: &str) -> Result<Vec<Holding>> {
        let transactions = self.transactions.list(owner_id).await?;
        let holdings = holdings::aggregate_holdings(&transactions);

        let quote_results = join_all(
            holdings
                .iter()
                .map(|holding| self.market_data.quote(holding.symbol())),
        )
        .await;

        let mut currencies: BTreeSet<String> = BTreeSet::new();
        for result in &quote_results {
            if let Ok(Some(quote)) = result {
                currencies.insert(anomaly::normalize_currency_code(quote.currency()).to_string());
            }
        }
        let rate_results = join_all(
            currencies
                .iter()
                .map(|currency| self.market_data.fx_rate(currency, None)),
        )
        .await;
        let mut rates: HashMap<String, Decimal> = HashMap::new();
        for (currency, result) in currencies.into_iter().zip(rate_results) {
            match result {
                Ok(rate) => {
                    rates.insert(currency, rate);
                }
                Err(err) => {
                    warn!(
                        "FX rate fetch failed for {}, defaulting to 1: {}",
                        currency, err
                    );
                    rates.insert(currency, Decimal::ONE);
                }
            }
        }

        let mut merged = Vec::with_capacity(holdings.len());
        for (holding, result) in holdings.into_iter().zip(quote_results) {
            match result {
                Ok(Some(quote)) => {
                    let currency = anomaly::normalize_currency_code(quote.currency());
                    let rate = rates.get(currency).copied().unwrap_or(Decimal::ONE);
                    merged.push(valuation::merge_live(
                        &holding,
                        *quote.price(),
                        quote.currency(),
                        rate,
                        *quote.change_percent(),
                    ));
                }
                Ok(None) => {
                    debug!("No live quote for {}", holding.symbol());
                    merged.push(holding);
                }
                Err(err) => {
                    warn!("Quote fetch failed for {}: {}", holding.symbol(), err);
                    merged.push(holding);
                }
            }
        }
        Ok(merged)
    }

    pub async fn summary(&self, owner_id: &str) -> Result<PortfolioSummary> {
        let holdings = self.holdings(owner_id).await?;
        let closed = self.closed_positions.list(owner_id).await?;
        Ok(summary::summarize(&holdings, &closed))
    }

    /// Day-by-day portfolio history since the first transaction. The full
    /// transaction replay runs on every call; the price fetch is the
    /// incremental part, extended only past the cached day.
    pub async fn daily_series(&self, owner_id: &str) -> Result<Vec<DailySeriesPoint>> {
        let revision = self.revision.load(Ordering::SeqCst);
        let transactions = self.transactions.list(owner_id).await?;
        if transactions.is_empty() {
            return Ok(Vec::new());
        }
        let today = Local::now().date_naive();
        let key = self.series_cache_key(owner_id);

        let cached: Option<SeriesCacheEntry> = self
            .cache
            .get(&key)
            .and_then(|raw| serde_json::from_str(&raw).ok());

        let first_date = transactions
            .iter()
            .map(|t| *t.date())
            .min()
            .unwrap_or(today);

        let (mut prices, fetch_from): (PriceMap, Option<NaiveDate>) = match cached {
            Some(entry) if entry.through >= today => {
                debug!("Daily series cache fresh for {}", owner_id);
                (entry.prices, None)
            }
            Some(entry) => {
                let next = entry
                    .through
                    .succ_opt()
                    .unwrap_or(entry.through);
                (entry.prices, Some(next))
            }
            None => (PriceMap::new(), Some(first_date)),
        };

        if let Some(start) = fetch_from {
            let symbols: BTreeSet<String> =
                transactions.iter().map(|t| t.symbol().clone()).collect();
            let results = join_all(symbols.iter().map(|symbol| {
                self.market_data.historical_daily(symbol, start, today)
            }))
            .await;
            for (symbol, result) in symbols.into_iter().zip(results) {
                match result {
                    Ok(series) => {
                        prices.entry(symbol).or_default().extend(series);
                    }
                    Err(err) => {
                        warn!("Price history fetch failed for {}: {}", symbol, err);
                    }
                }
            }
        }

        let series = history::build_daily_series(&transactions, &prices, today);

        if self.revision.load(Ordering::SeqCst) == revision {
            let entry = SeriesCacheEntry {
                through: today,
                prices,
                series: series.clone(),
            };
            if let Ok(raw) = serde_json::to_string(&entry) {
                self.cache.set(&key, raw);
            }
        } else {
            debug!("Transactions changed during series rebuild, dropping cache update");
        }

        Ok(series)
    }

    /// Benchmark comparison line, cached independently of the portfolio
    /// series with the same incremental price-fetch discipline.
    pub async fn benchmark_series(
        &self,
        owner_id: &str,
        benchmark_symbol: &str,
    ) -> Result<Vec<BenchmarkPoint>> {
        let revision = self.revision.load(Ordering::SeqCst);
        let transactions = self.transactions.list(owner_id).await?;
        if transactions.is_empty() {
            return Ok(Vec::new());
        }
        let today = Local::now().date_naive();
        let key = self.benchmark_cache_key(owner_id, benchmark_symbol);

        let cached: Option<BenchmarkCacheEntry> = self
            .cache
            .get(&key)
            .and_then(|raw| serde_json::from_str(&raw).ok());

        let first_date = transactions
            .iter()
            .filter(|t| t.is_buy())
            .map(|t| *t.date())
            .min()
            .unwrap_or(today);

        let (mut prices, fetch_from) = match cached {
            Some(entry) if entry.through >= today => (entry.prices, None),
            Some(entry) => {
                let next = entry.through.succ_opt().unwrap_or(entry.through);
                (entry.prices, Some(next))
            }
            None => (Default::default(), Some(first_date)),
        };

        if let Some(start) = fetch_from {
            match self
                .market_data
                .historical_daily(benchmark_symbol, start, today)
                .await
            {
                Ok(series) => prices.extend(series),
                Err(err) => {
                    warn!(
                        "Benchmark price history fetch failed for {}: {}",
                        benchmark_symbol, err
                    );
                }
            }
        }

        let series = benchmark::build_benchmark_series(&transactions, &prices, today);

        if self.revision.load(Ordering::SeqCst) == revision {
            let entry = BenchmarkCacheEntry {
                through: today,
                prices,
                series: series.clone(),
            };
            if let Ok(raw) = serde_json::to_string(&entry) {
                self.cache.set(&key, raw);
            }
            if let Ok(mut keys) = self.benchmark_keys.lock() {
                keys.entry(owner_id.to_string())
                    .or_default()
                    .insert(benchmark_symbol.to_string());
            }
        }

        Ok(series)
    }

    /// Persists today's totals, overwriting any earlier snapshot for the
    /// same day.
    pub async fn save_snapshot(&self, owner_id: &str) -> Result<PortfolioSnapshot> {
        let summary = self.summary(owner_id).await?;
        let snapshot = PortfolioSnapshot::new(
            owner_id.to_string(),
            Local::now().date_naive(),
            *summary.value(),
            *summary.invested(),
            *summary.total_gain(),
        );
        self.snapshots.upsert(&snapshot).await?;
        Ok(snapshot)
    }

    /// Manual refresh, throttled by the cooldown. Returns `None` while the
    /// cooldown holds; re-running after it expires repeats the same
    /// idempotent fetch.
    pub async fn refresh_holdings(&self, owner_id: &str) -> Result<Option<Vec<Holding>>> {
        let now = Local::now();
        if let Ok(last) = self.last_refresh.lock() {
            if let Some(previous) = *last {
                if now - previous < Duration::minutes(REFRESH_COOLDOWN_MINUTES) {
                    debug!("Refresh throttled, cooldown active");
                    return Ok(None);
                }
            }
        }

        let holdings = self.holdings(owner_id).await?;
        if let Ok(mut last) = self.last_refresh.lock() {
            *last = Some(now);
        }
        Ok(Some(holdings))
    }

    /// Imports trades from a CSV file, resolving each trade's historical
    /// FX rate through the market-data source. An unavailable rate
    /// defaults to 1 with a warning rather than blocking the import.
    pub async fn import_csv(&self, owner_id: &str, path: &str) -> Result<usize> {
        let trades = csv_import::read_trades(path)?;
        let count = trades.len();

        for trade in trades {
            let rate = match self
                .market_data
                .fx_rate(trade.currency(), Some(*trade.date()))
                .await
            {
                Ok(rate) => rate,
                Err(err) => {
                    warn!(
                        "No {} rate for {}, defaulting to 1: {}",
                        trade.currency(),
                        trade.date(),
                        err
                    );
                    Decimal::ONE
                }
            };

            let transaction = Transaction::new(
                0,
                owner_id.to_string(),
                trade.symbol().clone(),
                None,
                trade.name().clone(),
                *trade.asset_type(),
                *trade.transaction_type(),
                *trade.date(),
                *trade.quantity(),
                *trade.price(),
                trade.currency().clone(),
                rate,
                *trade.fees(),
                trade.broker().clone(),
                None,
                None,
            );
            self.record_transaction(transaction).await?;
        }

        Ok(count)
    }
}
