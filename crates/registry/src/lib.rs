//! Product registry and provenance state machine.
//!
//! This crate is the authoritative record of which products exist and where
//! they currently are. Records are created once, identified by a dense
//! monotonic id sequence, and mutated only through the location-tracking
//! path; the backing ledger is append-only, so there is no delete operation
//! and ids are never reused.
//!
//! Layering, leaves first: [`IdentifierAllocator`] issues ids,
//! [`ProductStore`] owns every record, [`ProvenanceTracker`] applies
//! location transitions under an authorization policy, and
//! [`RegistryService`] is the façade external callers consume.

pub mod allocator;
pub mod product;
pub mod service;
pub mod store;
pub mod tracker;

pub use allocator::IdentifierAllocator;
pub use product::{ORIGIN_LOCATION, Product, ProductSummary};
pub use service::RegistryService;
pub use store::ProductStore;
pub use tracker::{AnyRequester, OwnerOnly, ProvenanceTracker, TrackingPolicy};
