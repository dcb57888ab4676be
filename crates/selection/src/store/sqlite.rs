//! SQLite-backed target store.
//!
//! The `date` primary key is the uniqueness guarantee; inserts use
//! `ON CONFLICT(date) DO NOTHING` so concurrent writers, including writers
//! in other processes, can never commit two rows for one day.

use async_trait::async_trait;
use catalog::{DailyTarget, MovieId};
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;

use super::{InsertOutcome, TargetStore};
use crate::error::StoreError;

/// Target history in the `daily_targets` table
#[derive(Debug, Clone)]
pub struct SqliteTargetStore {
    pool: SqlitePool,
}

type TargetRow = (NaiveDate, i64);

impl SqliteTargetStore {
    /// Open (creating if needed) the database at `url`, e.g. `sqlite:data/targets.db`,
    /// and make sure the schema exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        // Ensure parent directory exists
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database, used by tests.
    ///
    /// A single connection keeps every query on the same memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and run the migration
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_targets (
                date TEXT PRIMARY KEY,
                movie_id INTEGER NOT NULL,
                selected_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn to_target((date, movie_id): TargetRow) -> Result<DailyTarget, StoreError> {
    let movie_id = MovieId::try_from(movie_id).map_err(|_| {
        StoreError::UnexpectedShape(format!("movie_id {movie_id} out of range for {date}"))
    })?;
    Ok(DailyTarget::new(date, movie_id))
}

#[async_trait]
impl TargetStore for SqliteTargetStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, date: NaiveDate) -> Result<Option<DailyTarget>, StoreError> {
        let row: Option<TargetRow> =
            sqlx::query_as("SELECT date, movie_id FROM daily_targets WHERE date = ?")
                .bind(date)
                .fetch_optional(&self.pool)
                .await?;

        row.map(to_target).transpose()
    }

    async fn targets_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<DailyTarget>, StoreError> {
        let rows: Vec<TargetRow> = sqlx::query_as(
            r#"
            SELECT date, movie_id FROM daily_targets
            WHERE date >= ? AND date < ?
            ORDER BY date DESC
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(to_target).collect()
    }

    async fn insert_if_absent(&self, target: DailyTarget) -> Result<InsertOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO daily_targets (date, movie_id, selected_at) VALUES (?, ?, ?)
            ON CONFLICT(date) DO NOTHING
            "#,
        )
        .bind(target.date)
        .bind(i64::from(target.movie_id))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(InsertOutcome::Inserted(target));
        }

        debug!("Target for {} already stored, reading winner", target.date);
        match self.get(target.date).await? {
            Some(existing) => Ok(InsertOutcome::Conflict(existing)),
            None => Err(StoreError::UnexpectedShape(format!(
                "insert for {} conflicted but no row exists",
                target.date
            ))),
        }
    }

    async fn history(&self, limit: usize) -> Result<Vec<DailyTarget>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<TargetRow> =
            sqlx::query_as("SELECT date, movie_id FROM daily_targets ORDER BY date DESC LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(to_target).collect()
    }
}
