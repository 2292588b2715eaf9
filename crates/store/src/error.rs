use thiserror::Error;

use tuckshop_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error: domain failures detected against persisted state, plus
/// whatever the database surfaces.
///
/// Store-level failures are not retried here; they propagate to the caller as
/// a generic internal error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("store failure: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found() -> Self {
        Self::Domain(DomainError::NotFound)
    }
}
