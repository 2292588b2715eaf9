//! Orders domain module.
//!
//! This crate contains the business rules of the order lifecycle, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage):
//!
//! - pricing & validation of submitted carts (the only place prices are
//!   computed — clients never supply prices)
//! - the order/line shapes with their frozen name/price snapshots
//! - the status state machine and its configurable transition policy
//! - the events broadcast after successful writes

pub mod event;
pub mod order;
pub mod pricing;
pub mod status;

pub use event::{OrderEvent, OrderEventKind};
pub use order::{CustomerDetails, Order, OrderLine};
pub use pricing::{price_order, OrderLineRequest, PricedLine, Quote};
pub use status::{OrderStatus, TransitionPolicy};
