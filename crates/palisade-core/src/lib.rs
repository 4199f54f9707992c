//! palisade-core: Shared types, classification, and TTL math for Palisade.
//!
//! This crate provides the foundational pieces used across all Palisade
//! components:
//! - Domain types (Indicator, Category, WhitelistEntry) for the block lists
//! - The indicator classifier (IP / hostname / FQDN)
//! - Expiration math (remaining TTL as a pure function of policy and clock)
//! - Event types for the notification channel

pub mod classify;
pub mod events;
pub mod expiry;
pub mod types;

pub use classify::classify;
pub use expiry::{remaining_ttl, Ttl};
