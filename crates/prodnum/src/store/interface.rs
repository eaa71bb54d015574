use crate::ProductNumber;
use std::sync::Arc;

/// Errors reported by a storage backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backend could not serve the request (connection loss, I/O
    /// failure, corrupt row). Transient from the allocator's point of view.
    #[error("backend unavailable: {context}")]
    Unavailable { context: String },

    /// A uniqueness constraint rejected the write: the number is already
    /// persisted. Raised by the backend, not the allocator, and signals that
    /// another process allocated concurrently.
    #[error("number {number} already persisted")]
    Duplicate { number: ProductNumber },
}

/// Read capability over the set of already-issued product numbers.
///
/// This is the allocator's single external seam. Implementations must return
/// a consistent snapshot as of the call (read-committed or stronger): the
/// allocator never caches the result and re-queries on every attempt.
pub trait NumberStore {
    /// Returns the highest-valued number currently persisted, or `None` if
    /// no entity carries one yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot serve a
    /// consistent read.
    fn find_latest(&self) -> Result<Option<ProductNumber>, StoreError>;
}

impl<S: NumberStore + ?Sized> NumberStore for &S {
    fn find_latest(&self) -> Result<Option<ProductNumber>, StoreError> {
        (**self).find_latest()
    }
}

impl<S: NumberStore + ?Sized> NumberStore for Arc<S> {
    fn find_latest(&self) -> Result<Option<ProductNumber>, StoreError> {
        (**self).find_latest()
    }
}
