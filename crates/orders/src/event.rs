use chrono::{DateTime, Utc};

use tuckshop_events::Event;

use crate::order::Order;

/// What happened to the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEventKind {
    /// A new order was committed to the ledger.
    Created,
    /// An order's status changed.
    StatusChanged,
}

/// Broadcast after every successful ledger write, carrying the fully hydrated
/// order so observers never need a follow-up read.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEvent {
    pub kind: OrderEventKind,
    pub order: Order,
    pub occurred_at: DateTime<Utc>,
}

impl OrderEvent {
    pub fn created(order: Order) -> Self {
        Self {
            kind: OrderEventKind::Created,
            order,
            occurred_at: Utc::now(),
        }
    }

    pub fn status_changed(order: Order) -> Self {
        Self {
            kind: OrderEventKind::StatusChanged,
            order,
            occurred_at: Utc::now(),
        }
    }
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self.kind {
            OrderEventKind::Created => "order:new",
            OrderEventKind::StatusChanged => "order:update",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
