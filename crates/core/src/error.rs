//! Registry error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the registry.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry-level error.
///
/// Every variant is a caller-correctable condition: nothing here is retried
/// internally and nothing is fatal to the service. A failed call leaves the
/// store exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Malformed input (empty name/location, unparseable id).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced product id has no record.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The requester fails the tracking authorization policy.
    #[error("unauthorized")]
    Unauthorized,
}

impl RegistryError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }
}
