//! palisade-store: the indicator, category, and whitelist store.
//!
//! [`MemoryStore`] is the single point of access for all block-list state.
//! Clone is cheap (inner Arc); every mutation runs under one write lock so
//! the token-uniqueness check and the insert are atomic with respect to
//! concurrent inserts. A relational backend can replace it behind the same
//! surface; the daemon and the tests run against this implementation.

pub mod error;
pub mod memory;

mod categories;
mod indicators;
mod whitelist;

pub use error::{Result, StoreError};
pub use indicators::{NewIndicator, SweepOutcome};
pub use memory::{CategorySpec, CategoryPatch, MemoryStore};
