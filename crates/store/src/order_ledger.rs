//! Durable record of orders and their line items.
//!
//! Each write is one all-or-nothing transaction; the ledger never holds a
//! partially-inserted order.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tuckshop_core::{ItemId, OrderId};
use tuckshop_orders::{CustomerDetails, Order, OrderLine, OrderStatus, Quote, TransitionPolicy};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct OrderLedger {
    pool: SqlitePool,
}

impl OrderLedger {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a priced order atomically: one order row (status NEW) plus all
    /// line items, committed together or not at all. Returns the hydrated
    /// order.
    ///
    /// The quote's snapshots are frozen here; nothing ever updates them.
    pub async fn create_order(
        &self,
        customer: &CustomerDetails,
        quote: &Quote,
    ) -> StoreResult<Order> {
        customer.validate()?;

        let created_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query(
            "INSERT INTO orders (customer_name, phone, total_cents, status, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(quote.total_cents)
        .bind(OrderStatus::New.as_str())
        .bind(created_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for line in &quote.lines {
            sqlx::query(
                "INSERT INTO order_items (order_id, item_id, qty, item_name_snapshot, price_cents_snapshot) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(line.item_id.0)
            .bind(line.qty)
            .bind(&line.item_name_snapshot)
            .bind(line.price_cents_snapshot)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.order(OrderId(order_id)).await
    }

    /// Hydrated order, or NotFound.
    pub async fn order(&self, id: OrderId) -> StoreResult<Order> {
        let row = sqlx::query(
            "SELECT id, customer_name, phone, total_cents, status, created_at \
             FROM orders WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => self.hydrate(&row).await,
            None => Err(StoreError::not_found()),
        }
    }

    /// All orders not yet COMPLETED, newest first. The live operational queue
    /// for staff displays.
    pub async fn list_active(&self) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, customer_name, phone, total_cents, status, created_at \
             FROM orders WHERE status != ? ORDER BY created_at DESC, id DESC",
        )
        .bind(OrderStatus::Completed.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            orders.push(self.hydrate(row).await?);
        }
        Ok(orders)
    }

    /// Transition an order's status under the given policy; persists only if
    /// the transition is legal. Returns the hydrated order after the change.
    pub async fn update_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
        policy: TransitionPolicy,
    ) -> StoreResult<Order> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT status FROM orders WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await?;
        let current: OrderStatus = match row {
            Some(row) => row.try_get::<String, _>("status")?.parse()?,
            None => return Err(StoreError::not_found()),
        };

        policy.check(current, new_status)?;

        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(new_status.as_str())
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.order(id).await
    }

    /// Attach line items, joining the current catalog name for display.
    /// A deleted referenced item never fails the read; `current_name` is
    /// simply absent and display falls back to the snapshot.
    async fn hydrate(&self, order_row: &SqliteRow) -> StoreResult<Order> {
        let order_id: i64 = order_row.try_get("id")?;

        let line_rows = sqlx::query(
            "SELECT oi.item_id, oi.qty, oi.item_name_snapshot, oi.price_cents_snapshot, \
                    mi.name AS current_name \
             FROM order_items oi \
             LEFT JOIN menu_items mi ON mi.id = oi.item_id \
             WHERE oi.order_id = ? ORDER BY oi.id ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        let mut lines = Vec::with_capacity(line_rows.len());
        for row in &line_rows {
            lines.push(OrderLine {
                item_id: ItemId(row.try_get("item_id")?),
                qty: row.try_get("qty")?,
                item_name_snapshot: row.try_get("item_name_snapshot")?,
                price_cents_snapshot: row.try_get("price_cents_snapshot")?,
                current_name: row.try_get("current_name")?,
            });
        }

        let created_at: DateTime<Utc> = order_row.try_get("created_at")?;
        Ok(Order {
            id: OrderId(order_id),
            customer_name: order_row.try_get("customer_name")?,
            phone: order_row.try_get("phone")?,
            total_cents: order_row.try_get("total_cents")?,
            status: order_row.try_get::<String, _>("status")?.parse()?,
            created_at,
            lines,
        })
    }
}
