//! Catalog domain module.
//!
//! Categories and menu items with price and availability. Pure domain types
//! and validation only (no IO, no HTTP, no storage).

pub mod item;
pub mod money;

pub use item::{Category, CategoryWithItems, MenuItem, MenuItemPatch, NewMenuItem};
pub use money::minor_units_from_major;
