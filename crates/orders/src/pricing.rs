//! Pricing & validation engine.
//!
//! The single place order totals are computed. Clients submit `{item_id,
//! qty}` pairs only; prices always come from the current catalog, which
//! closes off client-side price tampering.

use serde::Deserialize;

use tuckshop_catalog::MenuItem;
use tuckshop_core::{DomainError, DomainResult, ItemId};

/// One requested line: an item reference and an optional quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderLineRequest {
    pub item_id: ItemId,
    /// Defaults to 1 when absent; floored to a minimum of 1.
    pub qty: Option<i64>,
}

impl OrderLineRequest {
    pub fn new(item_id: ItemId, qty: i64) -> Self {
        Self {
            item_id,
            qty: Some(qty),
        }
    }

    /// Quantity with defaulting and flooring applied. Never below 1.
    pub fn normalized_qty(&self) -> i64 {
        self.qty.unwrap_or(1).max(1)
    }
}

/// A normalized line carrying the current catalog name and price as the
/// snapshot the ledger will freeze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub item_id: ItemId,
    pub qty: i64,
    pub item_name_snapshot: String,
    pub price_cents_snapshot: i64,
}

impl PricedLine {
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents_snapshot * self.qty
    }
}

/// Output of pricing: authoritative total plus the normalized lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub total_cents: i64,
    pub lines: Vec<PricedLine>,
}

/// Price a submitted cart against the current catalog.
///
/// All-or-nothing: the first request whose item is missing or marked
/// unavailable fails the whole order with `ItemUnavailable` naming that item.
/// An empty cart is rejected before any lookup. Quantities are
/// client-supplied, so the total is computed with checked arithmetic; a cart
/// whose total would not fit in i64 cents fails with `Validation`.
pub fn price_order(
    requests: &[OrderLineRequest],
    mut resolve: impl FnMut(ItemId) -> Option<MenuItem>,
) -> DomainResult<Quote> {
    if requests.is_empty() {
        return Err(DomainError::EmptyOrder);
    }

    let mut total_cents = 0i64;
    let mut lines = Vec::with_capacity(requests.len());

    for request in requests {
        let item = match resolve(request.item_id) {
            Some(item) if item.orderable() => item,
            _ => return Err(DomainError::ItemUnavailable(request.item_id)),
        };

        let qty = request.normalized_qty();
        total_cents = item
            .price_cents
            .checked_mul(qty)
            .and_then(|line_total| total_cents.checked_add(line_total))
            .ok_or_else(|| DomainError::validation("order total out of range"))?;
        lines.push(PricedLine {
            item_id: item.id,
            qty,
            item_name_snapshot: item.name,
            price_cents_snapshot: item.price_cents,
        });
    }

    Ok(Quote { total_cents, lines })
}
