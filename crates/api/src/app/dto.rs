use serde::Deserialize;

use tuckshop_catalog::CategoryWithItems;
use tuckshop_core::ItemId;
use tuckshop_orders::{Order, OrderLineRequest};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Major currency units; converted to minor units exactly once.
    pub price: f64,
    #[serde(default = "default_true")]
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Major currency units, when present.
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SetAvailabilityRequest {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub item_id: i64,
    pub qty: Option<i64>,
}

impl OrderItemRequest {
    pub fn to_domain(&self) -> OrderLineRequest {
        OrderLineRequest {
            item_id: ItemId(self.item_id),
            qty: self.qty,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub phone: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

fn default_true() -> bool {
    true
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn menu_to_json(menu: &[CategoryWithItems]) -> serde_json::Value {
    let categories: Vec<_> = menu
        .iter()
        .map(|entry| {
            serde_json::json!({
                "id": entry.category.id.0,
                "name": entry.category.name,
                "items": entry.items.iter().map(|item| serde_json::json!({
                    "id": item.id.0,
                    "name": item.name,
                    "description": item.description,
                    "price_cents": item.price_cents,
                    "available": item.available,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();
    serde_json::json!({ "categories": categories })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id.0,
        "customer_name": order.customer_name,
        "phone": order.phone,
        "total_cents": order.total_cents,
        "status": order.status.as_str(),
        "created_at": order.created_at.to_rfc3339(),
        "items": order.lines.iter().map(|line| serde_json::json!({
            "item_id": line.item_id.0,
            "qty": line.qty,
            "name": line.display_name(),
            "item_name_snapshot": line.item_name_snapshot,
            "price_cents_snapshot": line.price_cents_snapshot,
            "current_name": line.current_name,
        })).collect::<Vec<_>>(),
    })
}
