//! Error types for store operations.
//!
//! Conflicts (duplicate or whitelisted tokens) are expected in normal
//! operation and are never fatal. `Unavailable` is reserved for remote
//! backends and is the only retryable variant.

use palisade_core::types::{CategoryId, IndicatorId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Indicator already exists: {token}")]
    AlreadyExists { token: String },

    #[error("Token is whitelisted: {token}")]
    AlreadyWhitelisted { token: String },

    #[error("Token already tracked as an indicator: {token}")]
    TokenIsIndicator { token: String },

    #[error("Whitelist entry already exists: {token}")]
    WhitelistEntryExists { token: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Category name already taken: {name}")]
    CategoryNameTaken { name: String },

    #[error("Category is protected and cannot be deleted: {name}")]
    DefaultCategoryProtected { name: String },

    #[error("Indicator not found: {0}")]
    IndicatorNotFound(IndicatorId),

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unknown_category(id: CategoryId) -> Self {
        StoreError::UnknownCategory(id.to_string())
    }

    /// Whether the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
