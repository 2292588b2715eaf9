//! Catalog reads and admin writes.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use tuckshop_catalog::{Category, CategoryWithItems, MenuItem, MenuItemPatch, NewMenuItem};
use tuckshop_core::{CategoryId, ItemId};

use crate::error::{StoreError, StoreResult};

/// Store-backed catalog operations.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Categories ordered by (sort_order ASC, name ASC), each with its items
    /// in id order.
    pub async fn list_categories_with_items(&self) -> StoreResult<Vec<CategoryWithItems>> {
        let category_rows =
            sqlx::query("SELECT id, name, sort_order FROM menu_categories ORDER BY sort_order ASC, name ASC")
                .fetch_all(&self.pool)
                .await?;

        let item_rows = sqlx::query(
            "SELECT id, category_id, name, description, price_cents, available \
             FROM menu_items ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(item_rows.len());
        for row in &item_rows {
            items.push(item_from_row(row)?);
        }

        let mut menu = Vec::with_capacity(category_rows.len());
        for row in &category_rows {
            let category = Category {
                id: CategoryId(row.try_get("id")?),
                name: row.try_get("name")?,
                sort_order: row.try_get("sort_order")?,
            };
            let items = items
                .iter()
                .filter(|item| item.category_id == category.id)
                .cloned()
                .collect();
            menu.push(CategoryWithItems { category, items });
        }
        Ok(menu)
    }

    /// Current item, or `None` if it was never created (or has been removed).
    pub async fn item(&self, id: ItemId) -> StoreResult<Option<MenuItem>> {
        let row = sqlx::query(
            "SELECT id, category_id, name, description, price_cents, available \
             FROM menu_items WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(item_from_row).transpose()?)
    }

    pub async fn create_category(&self, name: &str, sort_order: i64) -> StoreResult<CategoryId> {
        let id = sqlx::query("INSERT INTO menu_categories (name, sort_order) VALUES (?, ?)")
            .bind(name)
            .bind(sort_order)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        Ok(CategoryId(id))
    }

    /// Create a menu item. The category reference is checked at write time
    /// (not just by the store-level foreign key), so an unknown category
    /// fails with NotFound before anything is inserted.
    pub async fn create_item(&self, new: &NewMenuItem) -> StoreResult<ItemId> {
        new.validate()?;

        let mut tx = self.pool.begin().await?;

        let category = sqlx::query("SELECT id FROM menu_categories WHERE id = ?")
            .bind(new.category_id.0)
            .fetch_optional(&mut *tx)
            .await?;
        if category.is_none() {
            return Err(StoreError::not_found());
        }

        let id = sqlx::query(
            "INSERT INTO menu_items (category_id, name, description, price_cents, available) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(new.category_id.0)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price_cents)
        .bind(new.available)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        Ok(ItemId(id))
    }

    /// Partial update: unspecified fields are left unchanged. Fails with
    /// NotFound if the item is absent.
    pub async fn update_item(&self, id: ItemId, patch: &MenuItemPatch) -> StoreResult<MenuItem> {
        patch.validate()?;

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT id, category_id, name, description, price_cents, available \
             FROM menu_items WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&mut *tx)
        .await?;
        let mut item = match row.as_ref() {
            Some(row) => item_from_row(row)?,
            None => return Err(StoreError::not_found()),
        };

        patch.apply_to(&mut item);

        sqlx::query("UPDATE menu_items SET name = ?, description = ?, price_cents = ? WHERE id = ?")
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price_cents)
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(item)
    }

    /// Idempotent availability toggle, independent of the update path.
    pub async fn set_availability(&self, id: ItemId, available: bool) -> StoreResult<()> {
        let result = sqlx::query("UPDATE menu_items SET available = ? WHERE id = ?")
            .bind(available)
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found());
        }
        Ok(())
    }
}

fn item_from_row(row: &SqliteRow) -> Result<MenuItem, sqlx::Error> {
    Ok(MenuItem {
        id: ItemId(row.try_get("id")?),
        category_id: CategoryId(row.try_get("category_id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price_cents: row.try_get("price_cents")?,
        available: row.try_get("available")?,
    })
}
