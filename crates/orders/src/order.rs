use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tuckshop_core::{DomainError, DomainResult, ItemId, OrderId};

use crate::status::OrderStatus;

/// One line of an order.
///
/// `item_name_snapshot` and `price_cents_snapshot` are captured at
/// order-creation time and never mutated: an order's historical total must
/// not change even if the catalog later changes. `item_id` is a weak
/// reference kept for display enrichment only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    /// Positive quantity (minimum 1).
    pub qty: i64,
    pub item_name_snapshot: String,
    /// Unit price in minor units, frozen at order time.
    pub price_cents_snapshot: i64,
    /// Current catalog name of the referenced item, if it still exists.
    /// Joined at read time; never load-bearing.
    pub current_name: Option<String>,
}

impl OrderLine {
    /// Name to display: the live catalog name when the item still exists,
    /// otherwise the frozen snapshot.
    pub fn display_name(&self) -> &str {
        self.current_name.as_deref().unwrap_or(&self.item_name_snapshot)
    }
}

/// A persisted order with its line items attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    /// Σ (price_cents_snapshot × qty) over the lines, fixed at creation and
    /// never recomputed.
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Active orders are everything short of the terminal COMPLETED state.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Who the order is for. Validated before any pricing or persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
}

impl CustomerDetails {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("customerName is required"));
        }
        if self.phone.trim().is_empty() {
            return Err(DomainError::validation("phone is required"));
        }
        Ok(())
    }
}
