use provchain_core::{AccountId, ProductId, RegistryResult};

use crate::product::{Product, ProductSummary};
use crate::store::ProductStore;
use crate::tracker::{ProvenanceTracker, TrackingPolicy};

/// Façade combining allocator, store and tracker.
///
/// This is the surface external callers (transport, signing, UI — all out of
/// scope here) consume. It owns no data of its own: every operation
/// delegates, and each one either fully commits or leaves the store exactly
/// as it was. The service is `Send + Sync`; share it behind an `Arc` across
/// however many sessions are issuing requests.
#[derive(Debug)]
pub struct RegistryService {
    store: ProductStore,
    tracker: ProvenanceTracker,
}

impl RegistryService {
    /// Service with the default owner-only tracking policy.
    pub fn new() -> Self {
        Self {
            store: ProductStore::new(),
            tracker: ProvenanceTracker::new(),
        }
    }

    /// Service with a caller-chosen tracking policy.
    pub fn with_policy(policy: Box<dyn TrackingPolicy>) -> Self {
        Self {
            store: ProductStore::new(),
            tracker: ProvenanceTracker::with_policy(policy),
        }
    }

    /// Register a new product; the caller becomes its owner.
    pub fn add_product(&self, name: &str, owner: AccountId) -> RegistryResult<ProductId> {
        let id = self.store.create(name, owner)?;
        tracing::info!(%id, %owner, "product registered");
        Ok(id)
    }

    /// Record a custody move: product `id` is now at `new_location`.
    pub fn track_product(
        &self,
        id: ProductId,
        new_location: &str,
        requester: AccountId,
    ) -> RegistryResult<()> {
        match self.tracker.track(&self.store, id, new_location, requester) {
            Ok(()) => {
                tracing::info!(%id, new_location, "product location updated");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, %requester, %err, "track rejected");
                Err(err)
            }
        }
    }

    /// Read-only snapshot of one product record.
    pub fn product_info(&self, id: ProductId) -> RegistryResult<Product> {
        self.store.get(id)
    }

    /// All products, ascending by id, reduced to their listing rows.
    pub fn list_products(&self) -> Vec<ProductSummary> {
        self.store
            .get_all()
            .iter()
            .map(ProductSummary::from)
            .collect()
    }

    /// The next unallocated id, mirroring the ledger's public counter:
    /// always the number of registered products plus one.
    pub fn product_count(&self) -> u64 {
        self.store.next_id().value()
    }
}

impl Default for RegistryService {
    fn default() -> Self {
        Self::new()
    }
}
