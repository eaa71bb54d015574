//! Error types for the allocation service.
//!
//! This module defines the central `Error` enum covering every way an
//! allocation can fail. The variants are deliberately precise: callers decide
//! retry policy from the variant alone.
//!
//! ## Error Cases
//! - `StorageUnavailable`: the storage collaborator's read or write failed.
//!   Transient; the whole allocation may be retried.
//! - `Overflow`: the next value cannot be rendered at the configured width.
//!   Fatal until the allocator is reconfigured with a wider format.
//! - `Timeout`: the allocation guard was not acquired within the deadline.
//!   Nothing was read or persisted; the caller may retry.
//! - `AllocationExhausted`: every attempt collided with a concurrently
//!   persisted number. Fatal for this call; retrying is a caller decision.

use crate::NumberError;
use core::time::Duration;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for number allocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The storage collaborator failed; no number was issued.
    #[error("storage unavailable: {context}")]
    StorageUnavailable { context: String },

    /// The next value exceeds the capacity of the configured width.
    #[error("next value {value} does not fit in width {width}")]
    Overflow { value: u32, width: u8 },

    /// The allocation guard was not acquired before the deadline elapsed.
    #[error("timed out after {waited:?} waiting for the allocation guard")]
    Timeout { waited: Duration },

    /// The retry budget ran out without a successful persist.
    #[error("allocation exhausted after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
}

impl From<NumberError> for Error {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::Overflow { value, width } => Self::Overflow { value, width },
            // Unreachable from an allocator whose width was validated at
            // construction; mapped conservatively to keep the conversion
            // total.
            other => Self::StorageUnavailable {
                context: other.to_string(),
            },
        }
    }
}
