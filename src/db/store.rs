use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::db::init;
use crate::models::{
    AssetType, ClosedPosition, PortfolioSnapshot, Transaction, TransactionType,
};

/// Transaction CRUD, scoped to one owner per call.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn list(&self, owner_id: &str) -> Result<Vec<Transaction>>;
    async fn insert(&self, transaction: &Transaction) -> Result<Transaction>;
    async fn update(&self, transaction: &Transaction) -> Result<()>;
    /// Deletes the owner's transaction and, in the same store transaction,
    /// any closed position it booked. A foreign owner's row is untouched.
    async fn delete(&self, owner_id: &str, id: i64) -> Result<()>;
}

#[async_trait]
pub trait ClosedPositionStore: Send + Sync {
    async fn list(&self, owner_id: &str) -> Result<Vec<ClosedPosition>>;
    async fn insert(&self, position: &ClosedPosition) -> Result<ClosedPosition>;
    async fn delete_for_transaction(&self, owner_id: &str, transaction_id: i64) -> Result<()>;
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// One row per owner per day; re-running for the same day overwrites.
    async fn upsert(&self, snapshot: &PortfolioSnapshot) -> Result<()>;
}

pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn init(&self) -> Result<()> {
        init::create_transactions(&self.pool).await?;
        init::create_closed_positions(&self.pool).await?;
        init::create_snapshots(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for SqliteStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM transactions
            WHERE owner_id = ?
            ORDER BY transaction_date, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(parse_transaction).collect()
    }

    async fn insert(&self, transaction: &Transaction) -> Result<Transaction> {
        let id = sqlx::query(
            r#"
            INSERT INTO transactions
            (
                owner_id,
                symbol,
                isin,
                name,
                asset_type,
                transaction_type,
                transaction_date,
                quantity,
                price,
                currency,
                exchange_rate,
                fees,
                broker,
                notes,
                price_multiplier
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction.owner_id())
        .bind(transaction.symbol())
        .bind(transaction.isin())
        .bind(transaction.name())
        .bind(transaction.asset_type().to_string())
        .bind(transaction.transaction_type().to_string())
        .bind(transaction.date().format("%Y-%m-%d").to_string())
        .bind(transaction.quantity().to_string())
        .bind(transaction.price().to_string())
        .bind(transaction.currency())
        .bind(transaction.exchange_rate().to_string())
        .bind(transaction.fees().as_ref().map(|f| f.to_string()))
        .bind(transaction.broker())
        .bind(transaction.notes())
        .bind(transaction.price_multiplier().as_ref().map(|m| m.to_string()))
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Transaction::new(
            id,
            transaction.owner_id().clone(),
            transaction.symbol().clone(),
            transaction.isin().clone(),
            transaction.name().clone(),
            *transaction.asset_type(),
            *transaction.transaction_type(),
            *transaction.date(),
            *transaction.quantity(),
            *transaction.price(),
            transaction.currency().clone(),
            *transaction.exchange_rate(),
            *transaction.fees(),
            transaction.broker().clone(),
            transaction.notes().clone(),
            *transaction.price_multiplier(),
        ))
    }

    async fn update(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE transactions SET
                symbol = ?,
                isin = ?,
                name = ?,
                asset_type = ?,
                transaction_type = ?,
                transaction_date = ?,
                quantity = ?,
                price = ?,
                currency = ?,
                exchange_rate = ?,
                fees = ?,
                broker = ?,
                notes = ?,
                price_multiplier = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(transaction.symbol())
        .bind(transaction.isin())
        .bind(transaction.name())
        .bind(transaction.asset_type().to_string())
        .bind(transaction.transaction_type().to_string())
        .bind(transaction.date().format("%Y-%m-%d").to_string())
        .bind(transaction.quantity().to_string())
        .bind(transaction.price().to_string())
        .bind(transaction.currency())
        .bind(transaction.exchange_rate().to_string())
        .bind(transaction.fees().as_ref().map(|f| f.to_string()))
        .bind(transaction.broker())
        .bind(transaction.notes())
        .bind(transaction.price_multiplier().as_ref().map(|m| m.to_string()))
        .bind(transaction.id())
        .bind(transaction.owner_id())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, owner_id: &str, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM closed_positions WHERE source_transaction_id = ? AND owner_id = ?",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM transactions WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ClosedPositionStore for SqliteStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<ClosedPosition>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM closed_positions
            WHERE owner_id = ?
            ORDER BY closed_at, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(parse_closed_position).collect()
    }

    async fn insert(&self, position: &ClosedPosition) -> Result<ClosedPosition> {
        let id = sqlx::query(
            r#"
            INSERT INTO closed_positions
            (
                owner_id,
                source_transaction_id,
                symbol,
                quantity,
                avg_buy_price,
                avg_buy_rate,
                sell_price,
                sell_rate,
                realized_profit,
                closed_at,
                broker
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(position.owner_id())
        .bind(position.source_transaction_id())
        .bind(position.symbol())
        .bind(position.quantity().to_string())
        .bind(position.avg_buy_price().to_string())
        .bind(position.avg_buy_rate().to_string())
        .bind(position.sell_price().to_string())
        .bind(position.sell_rate().to_string())
        .bind(position.realized_profit().to_string())
        .bind(position.closed_at().format("%Y-%m-%d").to_string())
        .bind(position.broker())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(ClosedPosition::new(
            id,
            position.owner_id().clone(),
            *position.source_transaction_id(),
            position.symbol().clone(),
            *position.quantity(),
            *position.avg_buy_price(),
            *position.avg_buy_rate(),
            *position.sell_price(),
            *position.sell_rate(),
            *position.realized_profit(),
            *position.closed_at(),
            position.broker().clone(),
        ))
    }

    async fn delete_for_transaction(&self, owner_id: &str, transaction_id: i64) -> Result<()> {
        sqlx::query(
            "DELETE FROM closed_positions WHERE source_transaction_id = ? AND owner_id = ?",
        )
        .bind(transaction_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn upsert(&self, snapshot: &PortfolioSnapshot) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO snapshots (owner_id, snapshot_date, value, invested, profit)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (owner_id, snapshot_date)
            DO UPDATE SET
                value = excluded.value,
                invested = excluded.invested,
                profit = excluded.profit,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(snapshot.owner_id())
        .bind(snapshot.date().format("%Y-%m-%d").to_string())
        .bind(snapshot.value().to_string())
        .bind(snapshot.invested().to_string())
        .bind(snapshot.profit().to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

fn parse_opt_string_from_row(row: &SqliteRow, column: &str) -> Result<Option<String>> {
    row.try_get::<Option<String>, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_string_from_row(row, column)?;
    Decimal::from_str(&value)
        .with_context(|| format!("Failed to parse Decimal from column '{}'", column))
}

fn parse_opt_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Option<Decimal>> {
    match parse_opt_string_from_row(row, column)? {
        Some(value) => Decimal::from_str(&value)
            .map(Some)
            .with_context(|| format!("Failed to parse Decimal from column '{}'", column)),
        None => Ok(None),
    }
}

fn parse_date_from_row(row: &SqliteRow, column: &str) -> Result<NaiveDate> {
    let value = parse_string_from_row(row, column)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse NaiveDate from column '{}'", column))
}

fn parse_transaction(row: SqliteRow) -> Result<Transaction> {
    let asset_type_str = parse_string_from_row(&row, "asset_type")?;
    let asset_type = AssetType::from_str(&asset_type_str)
        .with_context(|| format!("Unknown asset type '{}'", asset_type_str))?;
    let transaction_type_str = parse_string_from_row(&row, "transaction_type")?;
    let transaction_type = TransactionType::from_str(&transaction_type_str)
        .with_context(|| format!("Unknown transaction type '{}'", transaction_type_str))?;

    Ok(Transaction::new(
        parse_i64_from_row(&row, "id")?,
        parse_string_from_row(&row, "owner_id")?,
        parse_string_from_row(&row, "symbol")?,
        parse_opt_string_from_row(&row, "isin")?,
        parse_string_from_row(&row, "name")?,
        asset_type,
        transaction_type,
        parse_date_from_row(&row, "transaction_date")?,
        parse_decimal_from_row(&row, "quantity")?,
        parse_decimal_from_row(&row, "price")?,
        parse_string_from_row(&row, "currency")?,
        parse_decimal_from_row(&row, "exchange_rate")?,
        parse_opt_decimal_from_row(&row, "fees")?,
        parse_opt_string_from_row(&row, "broker")?,
        parse_opt_string_from_row(&row, "notes")?,
        parse_opt_decimal_from_row(&row, "price_multiplier")?,
    ))
}

fn parse_closed_position(row: SqliteRow) -> Result<ClosedPosition> {
    Ok(ClosedPosition::new(
        parse_i64_from_row(&row, "id")?,
        parse_string_from_row(&row, "owner_id")?,
        parse_i64_from_row(&row, "source_transaction_id")?,
        parse_string_from_row(&row, "symbol")?,
        parse_decimal_from_row(&row, "quantity")?,
        parse_decimal_from_row(&row, "avg_buy_price")?,
        parse_decimal_from_row(&row, "avg_buy_rate")?,
        parse_decimal_from_row(&row, "sell_price")?,
        parse_decimal_from_row(&row, "sell_rate")?,
        parse_decimal_from_row(&row, "realized_profit")?,
        parse_date_from_row(&row, "closed_at")?,
        parse_opt_string_from_row(&row, "broker")?,
    ))
}
