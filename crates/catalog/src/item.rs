use serde::{Deserialize, Serialize};

use tuckshop_core::{CategoryId, DomainError, DomainResult, ItemId};

/// Menu category. Created at seed/admin time, never deleted in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Display ordering, ascending.
    pub sort_order: i64,
}

/// A menu item as currently listed.
///
/// `name`, `description`, `price_cents` and `available` are all mutable, but
/// price changes never retroactively affect existing orders: orders snapshot
/// name and price at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    /// Price in integer minor units (cents). Never negative.
    pub price_cents: i64,
    pub available: bool,
}

impl MenuItem {
    /// Whether the item may appear on a new order.
    pub fn orderable(&self) -> bool {
        self.available
    }
}

/// A category with its items, as served on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithItems {
    pub category: Category,
    /// Items in id order.
    pub items: Vec<MenuItem>,
}

/// Input for creating a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub available: bool,
}

impl NewMenuItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.price_cents < 0 {
            return Err(DomainError::validation("price must not be negative"));
        }
        Ok(())
    }
}

/// Partial update for a menu item.
///
/// `None` means "leave unchanged" (partial-update semantics, not
/// null-overwrite). Availability has its own toggle and is not part of the
/// patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
}

impl MenuItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name must not be empty"));
            }
        }
        if let Some(price) = self.price_cents {
            if price < 0 {
                return Err(DomainError::validation("price must not be negative"));
            }
        }
        Ok(())
    }

    /// Apply the patch to an existing item, preserving unspecified fields.
    pub fn apply_to(&self, item: &mut MenuItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(price) = self.price_cents {
            item.price_cents = price;
        }
    }
}
