use serde::{Deserialize, Serialize};

use provchain_core::{AccountId, ProductId, RegistryError, RegistryResult};

/// Location every product starts at.
///
/// The record's location must be non-empty from the moment of creation, so
/// new products get this designated placeholder rather than an empty string.
pub const ORIGIN_LOCATION: &str = "origin";

/// A registered product.
///
/// `id`, `name` and `owner` are write-once; only `location` changes after
/// creation, and only through [`crate::ProvenanceTracker`]. The fields are
/// private so the store stays the single mutation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    location: String,
    owner: AccountId,
}

impl Product {
    /// Construct a freshly registered product at the origin location.
    ///
    /// Callers must have validated `name` already (see [`validate_name`]);
    /// the store does so before allocating an id.
    pub(crate) fn new(id: ProductId, name: impl Into<String>, owner: AccountId) -> Self {
        Self {
            id,
            name: name.into(),
            location: ORIGIN_LOCATION.to_string(),
            owner,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Overwrite the location. Store-internal: external callers go through
    /// the tracking path so the authorization policy is never bypassed.
    pub(crate) fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }
}

/// Listing row: the subset of a record the product list carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub location: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        product.summary()
    }
}

/// Reject empty (or whitespace-only) product names.
pub(crate) fn validate_name(name: &str) -> RegistryResult<()> {
    if name.trim().is_empty() {
        return Err(RegistryError::invalid_argument("name cannot be empty"));
    }
    Ok(())
}

/// Reject empty (or whitespace-only) locations.
pub(crate) fn validate_location(location: &str) -> RegistryResult<()> {
    if location.trim().is_empty() {
        return Err(RegistryError::invalid_argument("location cannot be empty"));
    }
    Ok(())
}
