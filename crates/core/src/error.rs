//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced category/item/order is absent.
    #[error("not found")]
    NotFound,

    /// An order referenced a missing or disabled menu item.
    /// Order creation aborts entirely; no partial fulfillment.
    #[error("item {0} unavailable")]
    ItemUnavailable(ItemId),

    /// An order was submitted with zero line items.
    #[error("order has no items")]
    EmptyOrder,

    /// A status transition target outside the enumerated set.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// A transition rejected by the configured status machine.
    #[error("illegal status transition: {0}")]
    InvalidTransition(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn invalid_status(status: impl Into<String>) -> Self {
        Self::InvalidStatus(status.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }
}
