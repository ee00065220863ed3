//! Strongly-typed identifiers used across the registry.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RegistryError;

/// Identifier of a registered product.
///
/// Ids form a dense sequence starting at 1. Id 0 is never allocated, so the
/// zero value is usable as a "before the first product" sentinel in callers
/// that need one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// The first id the allocator ever issues.
    pub const FIRST: ProductId = ProductId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The id immediately following this one.
    pub fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for u64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = RegistryError;

    /// Boundary translation for textual ids: malformed text (including
    /// negative numbers, which are unrepresentable here) is an
    /// `InvalidArgument`; a well-formed but unallocated id is only ever a
    /// `NotFound`, and that is the store's call to make.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = u64::from_str(s.trim())
            .map_err(|e| RegistryError::invalid_argument(format!("ProductId: {e}")))?;
        Ok(Self(value))
    }
}

/// Identity of a principal (the creator/owner of a product, or a requester
/// asking for a location update).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new identity.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing ids explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<AccountId> for Uuid {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl FromStr for AccountId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| RegistryError::invalid_argument(format!("AccountId: {e}")))?;
        Ok(Self(uuid))
    }
}
