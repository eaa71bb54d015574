#![doc = include_str!("../README.md")]

mod allocator;
mod error;
mod number;
#[cfg(feature = "serde")]
mod serde;
mod store;

pub use crate::allocator::*;
pub use crate::error::*;
pub use crate::number::*;
pub use crate::store::*;
