//! Pub/sub plumbing for live order notifications.
//!
//! Transport-agnostic: the API layer only sees [`EventBus`] and
//! [`Subscription`]; the in-memory bus is the only implementation in scope.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::InMemoryEventBus;
