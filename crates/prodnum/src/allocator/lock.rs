use crate::{
    DEFAULT_WIDTH, Error, MAX_WIDTH, NumberError, NumberStore, ProductNumber, Result, StoreError,
};
use core::fmt;
use core::time::Duration;
use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Default cap on read-compute-persist attempts per allocation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Tuning knobs for a [`LockNumberAllocator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Digit width of issued numbers. Defaults to [`DEFAULT_WIDTH`].
    pub width: u8,
    /// Total read-compute-persist attempts before the allocation fails with
    /// [`Error::AllocationExhausted`]. Only a [`StoreError::Duplicate`] from
    /// the persist step consumes an attempt. Defaults to
    /// [`DEFAULT_MAX_ATTEMPTS`].
    pub max_attempts: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A lock-based sequential number allocator suitable for multi-threaded
/// environments.
///
/// Issues fixed-width, zero-padded decimal [`ProductNumber`]s that are unique
/// and strictly increasing. The allocator owns no counter of its own: it
/// re-reads the high-water mark from a [`NumberStore`] on every attempt and
/// serializes the whole read-compute-persist sequence behind an internal
/// mutex, because that sequence is not atomic against the backend — two
/// unguarded callers could both read the same "latest" value and compute the
/// same successor.
///
/// ## Features
///
/// - ✅ Thread-safe: one guard serializes allocations process-wide
/// - ✅ Persistence happens inside the guard, via a caller-supplied closure
/// - ✅ Bounded retry against a backend uniqueness constraint
///
/// ## Scope of the guarantees
///
/// The in-process guard closes the race between threads of *one* process.
/// With several processes sharing a backend, the backend itself must enforce
/// a uniqueness constraint on the identifier column; the allocator treats the
/// resulting [`StoreError::Duplicate`] as a signal to re-read and retry, up
/// to [`AllocatorConfig::max_attempts`] times.
pub struct LockNumberAllocator<S> {
    store: S,
    config: AllocatorConfig,
    guard: Mutex<()>,
}

/// Reports the configuration only; the store and guard state stay opaque.
impl<S> fmt::Debug for LockNumberAllocator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockNumberAllocator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S> LockNumberAllocator<S>
where
    S: NumberStore,
{
    /// Creates an allocator with the default configuration (width 3, three
    /// attempts).
    ///
    /// # Example
    ///
    /// ```
    /// use prodnum::{InMemoryNumberStore, LockNumberAllocator};
    ///
    /// let store = InMemoryNumberStore::new();
    /// let allocator = LockNumberAllocator::new(store.clone());
    ///
    /// let issued = allocator.allocate_next(|n| store.insert(n)).unwrap();
    /// assert_eq!(issued.to_string(), "001");
    /// ```
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: AllocatorConfig::default(),
            guard: Mutex::new(()),
        }
    }

    /// Creates an allocator with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidWidth`] if the configured width is
    /// outside `1..=MAX_WIDTH`.
    pub fn with_config(store: S, config: AllocatorConfig) -> Result<Self, NumberError> {
        if config.width == 0 || config.width > MAX_WIDTH {
            return Err(NumberError::InvalidWidth {
                width: config.width,
            });
        }
        Ok(Self {
            store,
            config,
            guard: Mutex::new(()),
        })
    }

    /// The configuration this allocator was built with.
    pub const fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocates the next number, blocking until the guard is available.
    ///
    /// The `persist` closure receives the candidate number and must durably
    /// record it (typically by saving the entity that carries it). It runs
    /// while the guard is held, so no other allocation in this process can
    /// read the high-water mark between this call's read and its persist.
    ///
    /// # Returns
    ///
    /// The persisted number, strictly greater than every previously issued
    /// number.
    ///
    /// # Errors
    ///
    /// - [`Error::StorageUnavailable`]: the read or the persist failed;
    ///   nothing was issued and the caller may retry
    /// - [`Error::Overflow`]: the successor does not fit the configured
    ///   width; reconfigure before retrying
    /// - [`Error::AllocationExhausted`]: every attempt lost the uniqueness
    ///   race against another process
    ///
    /// # Example
    ///
    /// ```
    /// use prodnum::{InMemoryNumberStore, LockNumberAllocator, ProductNumber};
    ///
    /// let store = InMemoryNumberStore::seeded([ProductNumber::parse("009").unwrap()]);
    /// let allocator = LockNumberAllocator::new(store.clone());
    ///
    /// let issued = allocator.allocate_next(|n| store.insert(n)).unwrap();
    /// assert_eq!(issued.to_string(), "010");
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, persist)))]
    pub fn allocate_next<F>(&self, persist: F) -> Result<ProductNumber>
    where
        F: FnMut(ProductNumber) -> Result<(), StoreError>,
    {
        let _held = self.guard.lock();
        self.allocate_locked(persist)
    }

    /// Allocates the next number, waiting at most `deadline` for the guard.
    ///
    /// If the guard cannot be acquired in time the call fails with
    /// [`Error::Timeout`] and no state has changed: the high-water mark was
    /// never read and nothing was persisted. Once the guard is held the
    /// attempt runs to completion; the deadline does not bound storage
    /// latency.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use prodnum::{InMemoryNumberStore, LockNumberAllocator};
    ///
    /// let store = InMemoryNumberStore::new();
    /// let allocator = LockNumberAllocator::new(store.clone());
    ///
    /// let issued = allocator
    ///     .allocate_next_by(Duration::from_millis(50), |n| store.insert(n))
    ///     .unwrap();
    /// assert_eq!(issued.to_string(), "001");
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, persist)))]
    pub fn allocate_next_by<F>(&self, deadline: Duration, persist: F) -> Result<ProductNumber>
    where
        F: FnMut(ProductNumber) -> Result<(), StoreError>,
    {
        let Some(_held) = self.guard.try_lock_for(deadline) else {
            return Err(Error::Timeout { waited: deadline });
        };
        self.allocate_locked(persist)
    }

    /// Runs the bounded read-compute-persist loop. Caller must hold the
    /// guard.
    fn allocate_locked<F>(&self, mut persist: F) -> Result<ProductNumber>
    where
        F: FnMut(ProductNumber) -> Result<(), StoreError>,
    {
        let width = self.config.width;
        for _attempt in 0..self.config.max_attempts {
            let latest = self
                .store
                .find_latest()
                .map_err(|err| Error::StorageUnavailable {
                    context: err.to_string(),
                })?;

            let candidate = match latest {
                None => ProductNumber::first(width),
                Some(latest) => ProductNumber::new(latest.value() + 1, width),
            }?;

            match persist(candidate) {
                Ok(()) => return Ok(candidate),
                // Another process persisted this number first: re-read the
                // new high-water mark and try its successor.
                Err(StoreError::Duplicate { .. }) => continue,
                Err(err @ StoreError::Unavailable { .. }) => {
                    return Err(Error::StorageUnavailable {
                        context: err.to_string(),
                    });
                }
            }
        }

        Err(Error::AllocationExhausted {
            attempts: self.config.max_attempts,
        })
    }
}
