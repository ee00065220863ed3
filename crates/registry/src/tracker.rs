use provchain_core::{AccountId, ProductId, RegistryError, RegistryResult};

use crate::product::Product;
use crate::store::ProductStore;

/// Authorization predicate for location updates.
///
/// Pure policy check: no IO, no panics, no business logic. Evaluated against
/// a snapshot of the record before any mutation happens.
pub trait TrackingPolicy: Send + Sync {
    fn is_authorized(&self, record: &Product, requester: AccountId) -> bool;
}

/// Only the record's owner may move it. The default: a provenance record
/// that anyone can rewrite is not much of a provenance record.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOnly;

impl TrackingPolicy for OwnerOnly {
    fn is_authorized(&self, record: &Product, requester: AccountId) -> bool {
        record.owner() == requester
    }
}

/// Anyone may record a location update.
///
/// This reproduces the behavior observed on the original ledger contract,
/// which performs no owner check on `trackProduct`. Opt in via
/// [`crate::RegistryService::with_policy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyRequester;

impl TrackingPolicy for AnyRequester {
    fn is_authorized(&self, _record: &Product, _requester: AccountId) -> bool {
        true
    }
}

/// Applies location-update transitions to existing records.
///
/// Existence and argument validation are the store's job; the tracker adds
/// the authorization gate in between. On rejection nothing is mutated.
pub struct ProvenanceTracker {
    policy: Box<dyn TrackingPolicy>,
}

impl ProvenanceTracker {
    /// Tracker with the default owner-only policy.
    pub fn new() -> Self {
        Self::with_policy(Box::new(OwnerOnly))
    }

    pub fn with_policy(policy: Box<dyn TrackingPolicy>) -> Self {
        Self { policy }
    }

    /// Record that product `id` is now at `new_location`.
    ///
    /// Surfaces the store's `NotFound`/`InvalidArgument` verbatim; fails
    /// `Unauthorized` without touching the record when the policy rejects
    /// the requester. All-or-nothing either way.
    pub fn track(
        &self,
        store: &ProductStore,
        id: ProductId,
        new_location: &str,
        requester: AccountId,
    ) -> RegistryResult<()> {
        let record = store.get(id)?;
        if !self.policy.is_authorized(&record, requester) {
            return Err(RegistryError::Unauthorized);
        }
        store.update_location(id, new_location)
    }
}

impl Default for ProvenanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ProvenanceTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProvenanceTracker").finish_non_exhaustive()
    }
}
