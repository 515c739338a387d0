//! Cross-entity reference checks.
//!
//! References are plain ids resolved against the referenced kind's store at
//! the time of the check. Nothing here cascades on delete.

use super::entity::{Entity, EntityId};
use super::error::Error;
use super::fields::unknown_reference;
use super::lifecycle::map_store_error;
use super::ports::Store;

/// Whether `id` is currently held by `store`.
pub async fn exists_in<R: Entity>(store: &dyn Store<R>, id: &EntityId) -> Result<bool, Error> {
    store
        .get(id)
        .await
        .map(|found| found.is_some())
        .map_err(|err| map_store_error(R::KIND, err))
}

/// Fail with `invalid_field` on `field` unless `id` resolves in `store`.
pub async fn require_reference<R: Entity>(
    store: &dyn Store<R>,
    field: &'static str,
    id: &EntityId,
) -> Result<(), Error> {
    if exists_in(store, id).await? {
        Ok(())
    } else {
        Err(unknown_reference(field, R::KIND, &id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amenity, AmenityDraft, ErrorCode, FieldMap, Metadata};
    use crate::outbound::memory::InMemoryStore;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    async fn store_with_one() -> (InMemoryStore<Amenity>, EntityId) {
        let map: FieldMap = serde_json::from_value(json!({ "name": "Pool" })).expect("object");
        let amenity = Amenity::new(
            Metadata::fresh(Utc::now()),
            AmenityDraft::from_fields(&map).expect("valid amenity"),
        );
        let id = *amenity.id();
        let store = InMemoryStore::new();
        store.put(id, amenity).await.expect("put succeeds");
        (store, id)
    }

    #[rstest]
    #[tokio::test]
    async fn resolves_stored_ids() {
        let (store, id) = store_with_one().await;
        assert!(exists_in(&store, &id).await.expect("lookup"));
        require_reference(&store, "amenity_id", &id)
            .await
            .expect("reference resolves");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_ids_fail_naming_the_field() {
        let (store, _) = store_with_one().await;
        let missing = EntityId::random();

        let err = require_reference(&store, "amenity_id", &missing)
            .await
            .expect_err("unknown reference");

        assert_eq!(err.code(), ErrorCode::InvalidField);
        assert_eq!(err.field(), Some("amenity_id"));
        assert!(err.message().contains(&missing.to_string()));
    }
}
