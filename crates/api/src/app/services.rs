//! Service wiring: store handles, event bus, and the write orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use tuckshop_catalog::{CategoryWithItems, MenuItem, MenuItemPatch, NewMenuItem};
use tuckshop_core::{ItemId, OrderId};
use tuckshop_events::{EventBus, InMemoryEventBus, Subscription};
use tuckshop_orders::{
    price_order, CustomerDetails, Order, OrderEvent, OrderLineRequest, OrderStatus,
    TransitionPolicy,
};
use tuckshop_store::{CatalogStore, Db, OrderLedger, StoreResult};

use crate::config::AppConfig;

/// Shared application services, injected into handlers via `Extension`.
///
/// Owns the store handles and the in-memory observer registry. Writes flow
/// through here so that pricing, persistence and fan-out stay in one place.
pub struct AppServices {
    db: Db,
    catalog: CatalogStore,
    ledger: OrderLedger,
    bus: Arc<InMemoryEventBus<OrderEvent>>,
    status_policy: TransitionPolicy,
}

impl AppServices {
    /// Open the configured database and wire the services.
    pub async fn connect(config: &AppConfig) -> StoreResult<Self> {
        let db = Db::connect(&config.database_url).await?;
        Ok(Self::with_db(db, config.status_policy))
    }

    /// Isolated in-memory instance for tests.
    pub async fn in_memory(status_policy: TransitionPolicy) -> StoreResult<Self> {
        let db = Db::in_memory().await?;
        Ok(Self::with_db(db, status_policy))
    }

    fn with_db(db: Db, status_policy: TransitionPolicy) -> Self {
        let catalog = db.catalog();
        let ledger = db.ledger();
        Self {
            db,
            catalog,
            ledger,
            bus: Arc::new(InMemoryEventBus::new()),
            status_policy,
        }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn status_policy(&self) -> TransitionPolicy {
        self.status_policy
    }

    /// Register a new observer for order events.
    pub fn subscribe(&self) -> Subscription<OrderEvent> {
        self.bus.subscribe()
    }

    // ── Catalog ──────────────────────────────────────────────────────────

    pub async fn menu(&self) -> StoreResult<Vec<CategoryWithItems>> {
        self.catalog.list_categories_with_items().await
    }

    pub async fn create_item(&self, new: &NewMenuItem) -> StoreResult<ItemId> {
        self.catalog.create_item(new).await
    }

    pub async fn update_item(&self, id: ItemId, patch: &MenuItemPatch) -> StoreResult<MenuItem> {
        self.catalog.update_item(id, patch).await
    }

    pub async fn set_availability(&self, id: ItemId, available: bool) -> StoreResult<()> {
        self.catalog.set_availability(id, available).await
    }

    // ── Orders ───────────────────────────────────────────────────────────

    pub async fn active_orders(&self) -> StoreResult<Vec<Order>> {
        self.ledger.list_active().await
    }

    pub async fn order(&self, id: OrderId) -> StoreResult<Order> {
        self.ledger.order(id).await
    }

    /// Full order submission: validate, price against the current catalog,
    /// persist atomically, then broadcast `order:new`.
    ///
    /// Every validation failure happens before any mutation; the ledger never
    /// sees a partially-valid order.
    pub async fn place_order(
        &self,
        customer: &CustomerDetails,
        requests: &[OrderLineRequest],
    ) -> StoreResult<Order> {
        customer.validate()?;

        let mut items: HashMap<ItemId, MenuItem> = HashMap::new();
        for request in requests {
            if !items.contains_key(&request.item_id) {
                if let Some(item) = self.catalog.item(request.item_id).await? {
                    items.insert(item.id, item);
                }
            }
        }
        let quote = price_order(requests, |id| items.get(&id).cloned())?;

        let order = self.ledger.create_order(customer, &quote).await?;
        tracing::info!(order_id = order.id.0, total_cents = order.total_cents, "order created");

        self.publish(OrderEvent::created(order.clone()));
        Ok(order)
    }

    /// Status transition: the state machine validates, the ledger persists,
    /// then `order:update` is broadcast.
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let order = self
            .ledger
            .update_status(id, status, self.status_policy)
            .await?;
        tracing::info!(order_id = order.id.0, status = %order.status, "order status changed");

        self.publish(OrderEvent::status_changed(order.clone()));
        Ok(order)
    }

    /// Fire-and-forget fan-out; a failed publish never fails the write that
    /// triggered it.
    fn publish(&self, event: OrderEvent) {
        if let Err(e) = self.bus.publish(event) {
            tracing::warn!(error = ?e, "order event dropped");
        }
    }
}
