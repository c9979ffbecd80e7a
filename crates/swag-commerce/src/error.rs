//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The cart store itself never surfaces these to its callers: lookups that
/// miss degrade to no-ops and persistence failures are logged and skipped.
/// They appear at the seams where a caller asked for strictness (the pricing
/// engine's strict quantity check, catalog lookups, the persistence port).
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No cart line with the given key.
    #[error("Item not in cart: {0}")]
    LineNotFound(String),

    /// Product is inactive, pending or out of stock.
    #[error("Product not available for purchase: {0}")]
    NotPurchasable(String),

    /// The key-value store could not be read or written.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// Stored or supplied data could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<swag_cache::CacheError> for CommerceError {
    fn from(e: swag_cache::CacheError) -> Self {
        match e {
            swag_cache::CacheError::SerializeError(inner) => {
                CommerceError::SerializationError(inner.to_string())
            }
            other => CommerceError::PersistenceUnavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
