//! End-to-end store tests against isolated in-memory databases.

use std::collections::HashMap;

use tuckshop_catalog::{MenuItem, MenuItemPatch, NewMenuItem};
use tuckshop_core::{CategoryId, DomainError, ItemId, OrderId};
use tuckshop_orders::{
    price_order, CustomerDetails, OrderLineRequest, OrderStatus, PricedLine, Quote,
    TransitionPolicy,
};

use crate::catalog_store::CatalogStore;
use crate::db::Db;
use crate::error::StoreError;

async fn fresh_db() -> Db {
    Db::in_memory().await.expect("in-memory db")
}

fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Thandi".to_string(),
        phone: "0821234567".to_string(),
    }
}

async fn seed_burger_menu(catalog: &CatalogStore) -> (ItemId, ItemId) {
    let burgers = catalog.create_category("Burgers", 1).await.unwrap();
    let sides = catalog.create_category("Sides", 2).await.unwrap();

    let burger = catalog
        .create_item(&NewMenuItem {
            category_id: burgers,
            name: "Classic Burger".to_string(),
            description: "150g beef patty, lettuce, tomato".to_string(),
            price_cents: 8500,
            available: true,
        })
        .await
        .unwrap();
    let chips = catalog
        .create_item(&NewMenuItem {
            category_id: sides,
            name: "Chips".to_string(),
            description: "Crispy fries".to_string(),
            price_cents: 3500,
            available: true,
        })
        .await
        .unwrap();
    (burger, chips)
}

/// Fetch the requested items and price the cart, the same composition the
/// service layer performs.
async fn quote(
    catalog: &CatalogStore,
    requests: &[OrderLineRequest],
) -> Result<Quote, DomainError> {
    let mut items: HashMap<ItemId, MenuItem> = HashMap::new();
    for request in requests {
        if let Some(item) = catalog.item(request.item_id).await.expect("catalog read") {
            items.insert(item.id, item.clone());
        }
    }
    price_order(requests, |id| items.get(&id).cloned())
}

#[tokio::test]
async fn order_total_is_snapshotted_against_later_price_changes() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, chips) = seed_burger_menu(&catalog).await;

    let q = quote(
        &catalog,
        &[
            OrderLineRequest::new(burger, 2),
            OrderLineRequest::new(chips, 1),
        ],
    )
    .await
    .unwrap();
    let order = ledger.create_order(&customer(), &q).await.unwrap();

    assert_eq!(order.total_cents, 20500);
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].qty, 2);
    assert_eq!(order.lines[1].qty, 1);

    // Reprice the burger; the persisted order must not move.
    catalog
        .update_item(
            burger,
            &MenuItemPatch {
                price_cents: Some(9000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let reread = ledger.order(order.id).await.unwrap();
    assert_eq!(reread.total_cents, 20500);
    assert_eq!(reread.lines[0].price_cents_snapshot, 8500);
    assert_eq!(reread.lines[0].item_name_snapshot, "Classic Burger");
}

#[tokio::test]
async fn failed_line_insert_rolls_back_the_whole_order() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    // A quote that violates the qty >= 1 constraint on the second line; the
    // first line insert succeeds, then the transaction must roll back.
    let bad = Quote {
        total_cents: 8500,
        lines: vec![
            PricedLine {
                item_id: burger,
                qty: 1,
                item_name_snapshot: "Classic Burger".to_string(),
                price_cents_snapshot: 8500,
            },
            PricedLine {
                item_id: burger,
                qty: 0,
                item_name_snapshot: "Classic Burger".to_string(),
                price_cents_snapshot: 8500,
            },
        ],
    };

    let err = ledger.create_order(&customer(), &bad).await.unwrap_err();
    assert!(matches!(err, StoreError::Sqlx(_)));

    // No partial order exists.
    assert!(ledger.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn unavailable_item_rejects_the_cart_and_persists_nothing() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, chips) = seed_burger_menu(&catalog).await;

    catalog.set_availability(chips, false).await.unwrap();

    let err = quote(
        &catalog,
        &[
            OrderLineRequest::new(burger, 1),
            OrderLineRequest::new(chips, 1),
        ],
    )
    .await
    .unwrap_err();
    assert_eq!(err, DomainError::ItemUnavailable(chips));

    assert!(ledger.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn existing_orders_survive_the_item_going_unavailable() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let q = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap();
    let order = ledger.create_order(&customer(), &q).await.unwrap();

    catalog.set_availability(burger, false).await.unwrap();

    // New submissions fail...
    let err = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap_err();
    assert_eq!(err, DomainError::ItemUnavailable(burger));

    // ...the existing order is untouched.
    let reread = ledger.order(order.id).await.unwrap();
    assert_eq!(reread.total_cents, 8500);
    assert_eq!(reread.lines.len(), 1);
}

#[tokio::test]
async fn deleted_item_falls_back_to_the_snapshot_name() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let q = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap();
    let order = ledger.create_order(&customer(), &q).await.unwrap();
    assert_eq!(order.lines[0].current_name.as_deref(), Some("Classic Burger"));

    // Deletion is out of scope for the API, but the weak reference must not
    // break reads if it ever happens.
    sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(burger.0)
        .execute(db.pool())
        .await
        .unwrap();

    let reread = ledger.order(order.id).await.unwrap();
    assert_eq!(reread.lines[0].current_name, None);
    assert_eq!(reread.lines[0].display_name(), "Classic Burger");
}

#[tokio::test]
async fn list_active_excludes_completed_and_is_newest_first() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let q = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap();
    let first = ledger.create_order(&customer(), &q).await.unwrap();
    let second = ledger.create_order(&customer(), &q).await.unwrap();
    let third = ledger.create_order(&customer(), &q).await.unwrap();

    let active = ledger.list_active().await.unwrap();
    let ids: Vec<_> = active.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    ledger
        .update_status(second.id, OrderStatus::Completed, TransitionPolicy::Permissive)
        .await
        .unwrap();

    let active = ledger.list_active().await.unwrap();
    let ids: Vec<_> = active.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);
}

#[tokio::test]
async fn update_status_persists_and_reads_back() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let q = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap();
    let order = ledger.create_order(&customer(), &q).await.unwrap();

    let updated = ledger
        .update_status(order.id, OrderStatus::Preparing, TransitionPolicy::Permissive)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Preparing);
    assert_eq!(
        ledger.order(order.id).await.unwrap().status,
        OrderStatus::Preparing
    );
}

#[tokio::test]
async fn permissive_policy_allows_backward_moves() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let q = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap();
    let order = ledger.create_order(&customer(), &q).await.unwrap();

    ledger
        .update_status(order.id, OrderStatus::Ready, TransitionPolicy::Permissive)
        .await
        .unwrap();
    let back = ledger
        .update_status(order.id, OrderStatus::New, TransitionPolicy::Permissive)
        .await
        .unwrap();
    assert_eq!(back.status, OrderStatus::New);
}

#[tokio::test]
async fn forward_only_policy_rejects_skips_and_leaves_status_untouched() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let q = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap();
    let order = ledger.create_order(&customer(), &q).await.unwrap();

    let err = ledger
        .update_status(order.id, OrderStatus::Ready, TransitionPolicy::ForwardOnly)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Domain(DomainError::InvalidTransition(_))
    ));
    assert_eq!(ledger.order(order.id).await.unwrap().status, OrderStatus::New);

    let next = ledger
        .update_status(order.id, OrderStatus::Preparing, TransitionPolicy::ForwardOnly)
        .await
        .unwrap();
    assert_eq!(next.status, OrderStatus::Preparing);
}

#[tokio::test]
async fn update_status_on_unknown_order_is_not_found() {
    let db = fresh_db().await;
    let ledger = db.ledger();

    let err = ledger
        .update_status(OrderId(404), OrderStatus::Ready, TransitionPolicy::Permissive)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Domain(DomainError::NotFound)));
}

#[tokio::test]
async fn create_order_requires_customer_details() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let ledger = db.ledger();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let q = quote(&catalog, &[OrderLineRequest::new(burger, 1)]).await.unwrap();
    let err = ledger
        .create_order(
            &CustomerDetails {
                name: String::new(),
                phone: "0821234567".to_string(),
            },
            &q,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
    assert!(ledger.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_item_checks_the_category_reference() {
    let db = fresh_db().await;
    let catalog = db.catalog();

    let err = catalog
        .create_item(&NewMenuItem {
            category_id: CategoryId(99),
            name: "Orphan".to_string(),
            description: String::new(),
            price_cents: 100,
            available: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Domain(DomainError::NotFound)));
}

#[tokio::test]
async fn update_item_preserves_unspecified_fields_in_the_store() {
    let db = fresh_db().await;
    let catalog = db.catalog();
    let (burger, _) = seed_burger_menu(&catalog).await;

    let updated = catalog
        .update_item(
            burger,
            &MenuItemPatch {
                name: Some("Classic Beef Burger".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Classic Beef Burger");
    assert_eq!(updated.price_cents, 8500);
    assert_eq!(updated.description, "150g beef patty, lettuce, tomato");

    let reread = catalog.item(burger).await.unwrap().unwrap();
    assert_eq!(reread, updated);
}

#[tokio::test]
async fn menu_listing_orders_categories_and_items() {
    let db = fresh_db().await;
    let catalog = db.catalog();

    let drinks = catalog.create_category("Drinks", 3).await.unwrap();
    let burgers = catalog.create_category("Burgers", 1).await.unwrap();
    // Same sort_order as Burgers; name breaks the tie.
    let bakes = catalog.create_category("Bakes", 1).await.unwrap();

    for (category, name) in [(drinks, "Cola"), (burgers, "Classic Burger"), (bakes, "Vetkoek")] {
        catalog
            .create_item(&NewMenuItem {
                category_id: category,
                name: name.to_string(),
                description: String::new(),
                price_cents: 1000,
                available: true,
            })
            .await
            .unwrap();
    }

    let menu = catalog.list_categories_with_items().await.unwrap();
    let names: Vec<_> = menu.iter().map(|c| c.category.name.as_str()).collect();
    assert_eq!(names, vec!["Bakes", "Burgers", "Drinks"]);
    assert_eq!(menu[0].items[0].name, "Vetkoek");
}

#[tokio::test]
async fn seed_if_empty_is_idempotent() {
    let db = fresh_db().await;

    assert!(db.seed_if_empty().await.unwrap());
    assert!(!db.seed_if_empty().await.unwrap());

    let menu = db.catalog().list_categories_with_items().await.unwrap();
    assert_eq!(menu.len(), 3);
    let item_count: usize = menu.iter().map(|c| c.items.len()).sum();
    assert_eq!(item_count, 4);
}
