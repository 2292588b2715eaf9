//! Currency helpers.
//!
//! Prices are stored as integer minor units (cents) everywhere; callers of the
//! admin API supply prices in major units and we convert exactly once, here.

use tuckshop_core::{DomainError, DomainResult};

/// Convert a price in major currency units to integer minor units, rounding
/// to the nearest cent.
///
/// Rejects negative, NaN and non-finite inputs; the catalog never carries a
/// negative price.
pub fn minor_units_from_major(major: f64) -> DomainResult<i64> {
    if !major.is_finite() {
        return Err(DomainError::validation("price must be a finite number"));
    }
    if major < 0.0 {
        return Err(DomainError::validation("price must not be negative"));
    }
    Ok((major * 100.0).round() as i64)
}
