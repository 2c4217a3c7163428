use std::{env, sync::Arc};

use clap::Parser;
use portfolio_engine::{
    api::FmpMarketData,
    cache::MemoryCache,
    db::SqliteStore,
    services::PortfolioService,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

#[derive(Parser)]
#[command(about = "Multi-currency portfolio tracker reporting in PLN")]
struct Args {
    /// Sqlite database path
    #[arg(long, default_value = "portfolio.db")]
    database: String,

    /// Owner whose portfolio is loaded
    #[arg(long, default_value = "default")]
    owner: String,

    /// CSV file with transactions to import before reporting
    #[arg(long)]
    import: Option<String>,

    /// Benchmark symbol for the comparison series
    #[arg(long)]
    benchmark: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let db_connect_options = SqliteConnectOptions::new()
        .filename(&args.database)
        .create_if_missing(true);
    let connection = SqlitePool::connect_with(db_connect_options).await?;

    let store = Arc::new(SqliteStore::new(connection));
    store.init().await?;

    let api_key = env::var("FMP_API_KEY").expect("Missing FMP_API_KEY in environment");
    let market_data = Arc::new(FmpMarketData::new(api_key, String::from("PLN")));
    let cache = Arc::new(MemoryCache::new());

    let service = PortfolioService::new(
        store.clone(),
        store.clone(),
        store,
        market_data,
        cache,
        String::from("PLN"),
    );

    if let Some(path) = &args.import {
        let path = shellexpand::tilde(path);
        let imported = service.import_csv(&args.owner, &path).await?;
        println!("Imported {} transactions", imported);
    }

    let holdings = service.holdings(&args.owner).await?;
    for holding in &holdings {
        println!(
            "{:<12} {:>14} @ {:>10} {} -> {:>14} PLN",
            holding.symbol(),
            holding.quantity().round_dp(4),
            holding.avg_buy_price().round_dp(2),
            holding.currency(),
            holding.value_or_cost().round_dp(2),
        );
    }

    let summary = service.summary(&args.owner).await?;
    println!(
        "Total: {} PLN (invested {} PLN, day {}%, total return {} PLN / {}%)",
        summary.value().round_dp(2),
        summary.invested().round_dp(2),
        summary.day_change_percent().round_dp(2),
        summary.total_gain().round_dp(2),
        summary.total_gain_percent().round_dp(2),
    );

    service.save_snapshot(&args.owner).await?;

    if let Some(symbol) = &args.benchmark {
        let series = service.benchmark_series(&args.owner, symbol).await?;
        if let Some(last) = series.last() {
            println!(
                "Benchmark ({}): {} PLN today",
                symbol,
                last.value().round_dp(2)
            );
        }
    }

    Ok(())
}
