//! Database handle: open/bootstrap/seed/close lifecycle.

use core::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::catalog_store::CatalogStore;
use crate::error::StoreResult;
use crate::order_ledger::OrderLedger;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS menu_categories (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  sort_order INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS menu_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  category_id INTEGER NOT NULL,
  name TEXT NOT NULL,
  description TEXT NOT NULL DEFAULT '',
  price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
  available INTEGER NOT NULL DEFAULT 1,
  FOREIGN KEY (category_id) REFERENCES menu_categories (id)
);
CREATE TABLE IF NOT EXISTS orders (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  customer_name TEXT NOT NULL,
  phone TEXT NOT NULL,
  total_cents INTEGER NOT NULL,
  status TEXT NOT NULL DEFAULT 'NEW',
  created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS order_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  order_id INTEGER NOT NULL,
  item_id INTEGER NOT NULL,
  qty INTEGER NOT NULL CHECK (qty >= 1),
  item_name_snapshot TEXT NOT NULL,
  price_cents_snapshot INTEGER NOT NULL,
  FOREIGN KEY (order_id) REFERENCES orders (id)
);
"#;

/// Process-wide store handle.
///
/// Explicitly constructed and injected (never ambient global state) so tests
/// can run against isolated in-memory instances. Cloning shares the
/// underlying pool.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database at `url` and bootstrap the
    /// schema. WAL journaling matches the original deployment profile.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.bootstrap().await?;
        Ok(db)
    }

    /// Fresh private in-memory database, one connection so every query sees
    /// the same data. Test/dev only.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.bootstrap().await?;
        Ok(db)
    }

    async fn bootstrap(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn catalog(&self) -> CatalogStore {
        CatalogStore::new(self.pool.clone())
    }

    pub fn ledger(&self) -> OrderLedger {
        OrderLedger::new(self.pool.clone())
    }

    /// Seed the demo menu when the catalog is empty. Returns whether anything
    /// was inserted. Safe to call on every startup.
    pub async fn seed_if_empty(&self) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_categories")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;

        let mut category_ids = Vec::new();
        for (name, sort_order) in [("Burgers", 1i64), ("Sides", 2), ("Drinks", 3)] {
            let id = sqlx::query("INSERT INTO menu_categories (name, sort_order) VALUES (?, ?)")
                .bind(name)
                .bind(sort_order)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            category_ids.push(id);
        }

        let items: [(i64, &str, &str, i64); 4] = [
            (category_ids[0], "Classic Burger", "150g beef patty, lettuce, tomato", 8500),
            (category_ids[0], "Cheese Burger", "Beef patty with cheddar", 9500),
            (category_ids[1], "Chips", "Crispy fries", 3500),
            (category_ids[2], "Cola", "330ml can", 2000),
        ];
        for (category_id, name, description, price_cents) in items {
            sqlx::query(
                "INSERT INTO menu_items (category_id, name, description, price_cents, available) \
                 VALUES (?, ?, ?, ?, 1)",
            )
            .bind(category_id)
            .bind(name)
            .bind(description)
            .bind(price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!("seeded demo menu");
        Ok(true)
    }

    /// Close the pool; part of the explicit shutdown lifecycle.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
