//! SQLite-backed durable store.
//!
//! One explicitly constructed [`Db`] handle per process (opened at startup,
//! closed at shutdown, injectable for tests). Every mutation is a single
//! short transaction; there is no externally-visible intermediate state.

pub mod catalog_store;
pub mod db;
pub mod error;
pub mod order_ledger;

#[cfg(test)]
mod integration_tests;

pub use catalog_store::CatalogStore;
pub use db::Db;
pub use error::{StoreError, StoreResult};
pub use order_ledger::OrderLedger;
