use crate::{NumberStore, ProductNumber, StoreError};
use parking_lot::Mutex;
use std::{collections::BTreeSet, sync::Arc};

/// An in-process [`NumberStore`] backed by an ordered set.
///
/// The set plays the role of a database table with a unique constraint on the
/// identifier column: [`Self::insert`] rejects an already-present number with
/// [`StoreError::Duplicate`], which is exactly the backstop signal the
/// allocator's retry loop consumes in multi-writer deployments.
///
/// Cloning is cheap and shares the underlying set, so one store can be handed
/// to many threads.
///
/// # Example
///
/// ```
/// use prodnum::{InMemoryNumberStore, NumberStore, ProductNumber};
///
/// let store = InMemoryNumberStore::default();
/// assert_eq!(store.find_latest().unwrap(), None);
///
/// let n = ProductNumber::parse("001").unwrap();
/// store.insert(n).unwrap();
/// assert_eq!(store.find_latest().unwrap(), Some(n));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryNumberStore {
    inner: Arc<Mutex<BTreeSet<ProductNumber>>>,
}

impl InMemoryNumberStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with already-issued numbers.
    pub fn seeded<I>(numbers: I) -> Self
    where
        I: IntoIterator<Item = ProductNumber>,
    {
        Self {
            inner: Arc::new(Mutex::new(numbers.into_iter().collect())),
        }
    }

    /// Persists a number, enforcing uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if `number` is already present.
    pub fn insert(&self, number: ProductNumber) -> Result<(), StoreError> {
        let mut set = self.inner.lock();
        if !set.insert(number) {
            return Err(StoreError::Duplicate { number });
        }
        Ok(())
    }

    /// Number of persisted entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl NumberStore for InMemoryNumberStore {
    fn find_latest(&self) -> Result<Option<ProductNumber>, StoreError> {
        Ok(self.inner.lock().iter().next_back().copied())
    }
}
