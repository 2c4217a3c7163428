use sqlx::sqlite::SqliteQueryResult;

// Decimal columns are stored as TEXT so crypto quantities keep their full
// eight decimal places.

pub async fn create_transactions(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            symbol TEXT NOT NULL,
            isin TEXT,
            name TEXT NOT NULL,
            asset_type TEXT NOT NULL,
            transaction_type TEXT NOT NULL,
            transaction_date TEXT NOT NULL,
            quantity TEXT NOT NULL,
            price TEXT NOT NULL,
            currency TEXT NOT NULL,
            exchange_rate TEXT NOT NULL,
            fees TEXT,
            broker TEXT,
            notes TEXT,
            price_multiplier TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_closed_positions(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS closed_positions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            source_transaction_id INTEGER NOT NULL REFERENCES transactions(id),
            symbol TEXT NOT NULL,
            quantity TEXT NOT NULL,
            avg_buy_price TEXT NOT NULL,
            avg_buy_rate TEXT NOT NULL,
            sell_price TEXT NOT NULL,
            sell_rate TEXT NOT NULL,
            realized_profit TEXT NOT NULL,
            closed_at TEXT NOT NULL,
            broker TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_snapshots(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            snapshot_date TEXT NOT NULL,
            value TEXT NOT NULL,
            invested TEXT NOT NULL,
            profit TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(owner_id, snapshot_date)
        )
        "#,
    )
    .execute(connection)
    .await
}
