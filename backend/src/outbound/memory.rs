//! In-memory store adapter.
//!
//! Records live for the lifetime of the process. A read/write lock guards
//! each store; writers coordinate among themselves through the lifecycle
//! write gate, so the lock here only protects the map itself.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{Store, StoreError};
use crate::domain::{EntityId, MarketplaceStores};

struct Records<R> {
    by_id: HashMap<EntityId, R>,
    order: Vec<EntityId>,
}

/// Store keeping records in a map plus their insertion order.
pub struct InMemoryStore<R> {
    records: RwLock<Records<R>>,
}

impl<R> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records {
                by_id: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> Store<R> for InMemoryStore<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn put(&self, id: EntityId, record: R) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.by_id.insert(id, record).is_none() {
            records.order.push(id);
        }
        Ok(())
    }

    async fn get(&self, id: &EntityId) -> Result<Option<R>, StoreError> {
        Ok(self.records.read().await.by_id.get(id).cloned())
    }

    async fn delete(&self, id: &EntityId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        if records.by_id.remove(id).is_none() {
            return Ok(false);
        }
        records.order.retain(|existing| existing != id);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<R>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id).cloned())
            .collect())
    }
}

/// A fresh, empty in-memory store for every entity kind.
pub fn in_memory_stores() -> MarketplaceStores {
    MarketplaceStores {
        countries: Arc::new(InMemoryStore::new()),
        cities: Arc::new(InMemoryStore::new()),
        users: Arc::new(InMemoryStore::new()),
        amenities: Arc::new(InMemoryStore::new()),
        places: Arc::new(InMemoryStore::new()),
        reviews: Arc::new(InMemoryStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore<String> {
        InMemoryStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn list_follows_insertion_order(store: InMemoryStore<String>) {
        let ids: Vec<EntityId> = (0..3).map(|_| EntityId::random()).collect();
        for (index, id) in ids.iter().enumerate() {
            store.put(*id, format!("record {index}")).await.expect("put");
        }

        let listed = store.list().await.expect("list");
        assert_eq!(listed, vec!["record 0", "record 1", "record 2"]);
    }

    #[rstest]
    #[tokio::test]
    async fn replacing_keeps_position(store: InMemoryStore<String>) {
        let first = EntityId::random();
        let second = EntityId::random();
        store.put(first, "a".to_owned()).await.expect("put");
        store.put(second, "b".to_owned()).await.expect("put");

        store.put(first, "a2".to_owned()).await.expect("replace");

        assert_eq!(store.list().await.expect("list"), vec!["a2", "b"]);
        assert_eq!(store.get(&first).await.expect("get"), Some("a2".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed(store: InMemoryStore<String>) {
        let id = EntityId::random();
        store.put(id, "gone soon".to_owned()).await.expect("put");

        assert!(store.delete(&id).await.expect("delete"));
        assert!(!store.delete(&id).await.expect("delete again"));
        assert!(store.list().await.expect("list").is_empty());
        assert_eq!(store.get(&id).await.expect("get"), None);
    }
}
