use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use provchain_core::{AccountId, ProductId, RegistryError, RegistryResult};

use crate::allocator::IdentifierAllocator;
use crate::product::{Product, validate_location, validate_name};

/// Everything the registry persists: the id→record map and the allocator
/// counter. Kept under one lock so id allocation and record insertion commit
/// together.
#[derive(Debug)]
struct RegistryState {
    allocator: IdentifierAllocator,
    records: BTreeMap<ProductId, Product>,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            allocator: IdentifierAllocator::new(),
            records: BTreeMap::new(),
        }
    }
}

/// Authoritative owner of all product records.
///
/// Readers take the read lock and get cloned snapshots, so a record can
/// never be observed half-written; writers are mutually exclusive through
/// the write lock. No component outside this module ever holds a mutable
/// reference to a record.
#[derive(Debug)]
pub struct ProductStore {
    state: RwLock<RegistryState>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::new()),
        }
    }

    /// Register a new product owned by `owner` and return its id.
    ///
    /// Validation happens before the id is allocated: a rejected creation
    /// leaves the counter where it was, so the next successful creation
    /// still receives the id it would have received anyway.
    pub fn create(&self, name: &str, owner: AccountId) -> RegistryResult<ProductId> {
        validate_name(name)?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = state.allocator.next();
        let previous = state.records.insert(id, Product::new(id, name, owner));
        debug_assert!(previous.is_none(), "allocator issued an already-used id");
        Ok(id)
    }

    /// Read-only snapshot of one record.
    pub fn get(&self, id: ProductId) -> RegistryResult<Product> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .records
            .get(&id)
            .cloned()
            .ok_or(RegistryError::NotFound(id))
    }

    /// Snapshot of every record, in ascending id order.
    ///
    /// Taken under a single read acquisition, so the result is consistent:
    /// ids are dense from 1 and no record is torn by a concurrent write.
    pub fn get_all(&self) -> Vec<Product> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.records.values().cloned().collect()
    }

    /// Overwrite the location of an existing record. Every other field and
    /// the record's position in iteration order are untouched.
    pub fn update_location(&self, id: ProductId, new_location: &str) -> RegistryResult<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let record = state
            .records
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;
        validate_location(new_location)?;
        record.set_location(new_location);
        Ok(())
    }

    /// The id the next creation will receive (one past the highest
    /// allocated id).
    pub fn next_id(&self) -> ProductId {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.allocator.peek()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ORIGIN_LOCATION;
    use proptest::prelude::*;

    fn owner() -> AccountId {
        AccountId::new()
    }

    #[test]
    fn create_assigns_dense_ids_from_one() {
        let store = ProductStore::new();
        assert_eq!(store.create("Widget", owner()).unwrap(), ProductId::new(1));
        assert_eq!(store.create("Gadget", owner()).unwrap(), ProductId::new(2));
        assert_eq!(store.create("Pallet", owner()).unwrap(), ProductId::new(3));
        assert_eq!(store.next_id(), ProductId::new(4));
    }

    #[test]
    fn created_record_is_fully_populated() {
        let store = ProductStore::new();
        let creator = owner();
        let id = store.create("Widget", creator).unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.id(), id);
        assert_eq!(record.name(), "Widget");
        assert_eq!(record.location(), ORIGIN_LOCATION);
        assert_eq!(record.owner(), creator);
    }

    #[test]
    fn rejected_create_does_not_advance_the_counter() {
        let store = ProductStore::new();
        store.create("Widget", owner()).unwrap();

        let err = store.create("", owner()).unwrap_err();
        match err {
            RegistryError::InvalidArgument(_) => {}
            other => panic!("expected InvalidArgument, got {other:?}"),
        }

        // The failed call never happened as far as the sequence is concerned.
        assert_eq!(store.create("Gadget", owner()).unwrap(), ProductId::new(2));
    }

    #[test]
    fn get_unallocated_id_is_not_found() {
        let store = ProductStore::new();
        store.create("Widget", owner()).unwrap();

        for missing in [0u64, 2, 99] {
            let err = store.get(ProductId::new(missing)).unwrap_err();
            assert_eq!(err, RegistryError::NotFound(ProductId::new(missing)));
        }
    }

    #[test]
    fn get_returns_a_snapshot_not_an_alias() {
        let store = ProductStore::new();
        let id = store.create("Widget", owner()).unwrap();

        let before = store.get(id).unwrap();
        store.update_location(id, "Warehouse-B").unwrap();

        // The earlier snapshot is unaffected by the later write.
        assert_eq!(before.location(), ORIGIN_LOCATION);
        assert_eq!(store.get(id).unwrap().location(), "Warehouse-B");
    }

    #[test]
    fn update_location_changes_only_the_location() {
        let store = ProductStore::new();
        let creator = owner();
        let id = store.create("Widget", creator).unwrap();

        store.update_location(id, "Port of Rotterdam").unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.location(), "Port of Rotterdam");
        assert_eq!(record.name(), "Widget");
        assert_eq!(record.owner(), creator);
    }

    #[test]
    fn update_location_rejects_missing_id_and_empty_location() {
        let store = ProductStore::new();
        let id = store.create("Widget", owner()).unwrap();

        assert_eq!(
            store.update_location(ProductId::new(42), "Warehouse-B"),
            Err(RegistryError::NotFound(ProductId::new(42)))
        );

        let err = store.update_location(id, "  ").unwrap_err();
        match err {
            RegistryError::InvalidArgument(_) => {}
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
        // The rejected update left the record alone.
        assert_eq!(store.get(id).unwrap().location(), ORIGIN_LOCATION);
    }

    #[test]
    fn get_all_is_ascending_and_restartable() {
        let store = ProductStore::new();
        for name in ["a", "b", "c"] {
            store.create(name, owner()).unwrap();
        }
        store.update_location(ProductId::new(2), "Warehouse-B").unwrap();

        let first = store.get_all();
        let second = store.get_all();
        assert_eq!(first, second);

        let ids: Vec<u64> = first.iter().map(|p| p.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(first[1].location(), "Warehouse-B");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any interleaving of valid and invalid creation
        /// requests, the successful ones receive exactly `1, 2, 3, ...` in
        /// call order and `get_all` lists exactly those records, ascending.
        #[test]
        fn ids_stay_dense_under_arbitrary_creation_sequences(
            names in prop::collection::vec(
                prop_oneof![
                    "[A-Za-z][A-Za-z0-9 -]{0,12}",   // valid
                    Just(String::new()),             // rejected: empty
                    Just("   ".to_string()),         // rejected: whitespace
                ],
                1..40,
            )
        ) {
            let store = ProductStore::new();
            let creator = AccountId::new();
            let mut expected = Vec::new();

            for name in &names {
                match store.create(name, creator) {
                    Ok(id) => {
                        expected.push(id.value());
                        prop_assert_eq!(id.value(), expected.len() as u64);
                    }
                    Err(RegistryError::InvalidArgument(_)) => {
                        prop_assert!(name.trim().is_empty());
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
                }
            }

            let listed: Vec<u64> = store.get_all().iter().map(|p| p.id().value()).collect();
            prop_assert_eq!(&listed, &expected);
            prop_assert_eq!(store.next_id().value(), expected.len() as u64 + 1);
        }
    }
}
