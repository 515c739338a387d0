//! Shared create/update/delete machinery for one entity kind.
//!
//! A [`Lifecycle`] owns the store of its kind together with a write gate.
//! Services take the gate with [`Lifecycle::lock`] before validating a
//! mutation and keep it until the store write is done, so a uniqueness or
//! reference check cannot be invalidated by a concurrent writer of the same
//! kind. Reads go straight to the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use super::entity::{Entity, EntityId, Metadata};
use super::error::Error;
use super::ports::{CreateObserver, Store, StoreError};

/// Proof that the caller holds the write gate of a [`Lifecycle`].
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct WriteGuard<'a> {
    _gate: MutexGuard<'a, ()>,
}

/// Store, clock and create hook for records of kind `E`.
pub struct Lifecycle<E: Entity> {
    store: Arc<dyn Store<E>>,
    gate: Mutex<()>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn CreateObserver>,
}

pub(crate) fn map_store_error(kind: impl std::fmt::Display, error: StoreError) -> Error {
    Error::service_unavailable(format!("{kind} store failed: {error}"))
}

impl<E: Entity> Lifecycle<E> {
    pub fn new(
        store: Arc<dyn Store<E>>,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn CreateObserver>,
    ) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
            clock,
            observer,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &Arc<dyn Store<E>> {
        &self.store
    }

    /// Wait for exclusive write access to this kind.
    pub async fn lock(&self) -> WriteGuard<'_> {
        WriteGuard {
            _gate: self.gate.lock().await,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    pub async fn find(&self, id: &EntityId) -> Result<Option<E>, Error> {
        self.store
            .get(id)
            .await
            .map_err(|err| map_store_error(E::KIND, err))
    }

    /// Fetch a record, failing with `not_found` when absent.
    pub async fn get(&self, id: &EntityId) -> Result<E, Error> {
        self.find(id).await?.ok_or_else(|| not_found::<E>(id))
    }

    pub async fn list(&self) -> Result<Vec<E>, Error> {
        self.store
            .list()
            .await
            .map_err(|err| map_store_error(E::KIND, err))
    }

    /// Stamp fresh metadata onto a new record, store it and notify the hook.
    ///
    /// The guard is consumed: the gate is released once the record is stored
    /// and before the create hook runs. Hook failures are logged only.
    pub async fn insert(
        &self,
        guard: WriteGuard<'_>,
        build: impl FnOnce(Metadata) -> E + Send,
    ) -> Result<E, Error> {
        let record = build(Metadata::fresh(self.now()));
        self.store
            .put(*record.id(), record.clone())
            .await
            .map_err(|err| map_store_error(E::KIND, err))?;
        drop(guard);

        debug!(entity = %E::KIND, id = %record.id(), "record created");
        self.notify_created(&record).await;
        Ok(record)
    }

    /// Refresh `updated_at` and write an existing record back.
    pub async fn replace(&self, _guard: &WriteGuard<'_>, mut record: E) -> Result<E, Error> {
        record.metadata_mut().touch(self.now());
        self.store
            .put(*record.id(), record.clone())
            .await
            .map_err(|err| map_store_error(E::KIND, err))?;
        debug!(entity = %E::KIND, id = %record.id(), "record updated");
        Ok(record)
    }

    /// Delete a record, failing with `not_found` when absent.
    pub async fn remove(&self, _guard: &WriteGuard<'_>, id: &EntityId) -> Result<(), Error> {
        let removed = self
            .store
            .delete(id)
            .await
            .map_err(|err| map_store_error(E::KIND, err))?;
        if !removed {
            return Err(not_found::<E>(id));
        }
        debug!(entity = %E::KIND, %id, "record deleted");
        Ok(())
    }

    async fn notify_created(&self, record: &E) {
        let value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(error) => {
                warn!(entity = %E::KIND, id = %record.id(), %error, "could not serialise created record");
                return;
            }
        };
        if let Err(error) = self.observer.record_created(E::KIND, &value).await {
            warn!(entity = %E::KIND, id = %record.id(), %error, "create observer failed");
        }
    }
}

/// `not_found` error naming the kind and id.
pub(crate) fn not_found<E: Entity>(id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("{} not found for id {id}", E::KIND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CreateObserverError, MockCreateObserver, NoOpCreateObserver};
    use crate::domain::{Amenity, AmenityDraft, EntityKind, ErrorCode, FieldMap};
    use crate::outbound::memory::InMemoryStore;
    use crate::test_support::MutableClock;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    struct FailingStore;

    #[async_trait]
    impl Store<Amenity> for FailingStore {
        async fn put(&self, _id: EntityId, _record: Amenity) -> Result<(), StoreError> {
            Err(StoreError::unavailable("offline"))
        }

        async fn get(&self, _id: &EntityId) -> Result<Option<Amenity>, StoreError> {
            Err(StoreError::unavailable("offline"))
        }

        async fn delete(&self, _id: &EntityId) -> Result<bool, StoreError> {
            Err(StoreError::unavailable("offline"))
        }

        async fn list(&self) -> Result<Vec<Amenity>, StoreError> {
            Err(StoreError::unavailable("offline"))
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn draft(name: &str) -> AmenityDraft {
        let map: FieldMap = serde_json::from_value(json!({ "name": name })).expect("object");
        AmenityDraft::from_fields(&map).expect("valid amenity")
    }

    fn lifecycle(
        clock: Arc<MutableClock>,
        observer: Arc<dyn CreateObserver>,
    ) -> Lifecycle<Amenity> {
        Lifecycle::new(Arc::new(InMemoryStore::<Amenity>::new()), clock, observer)
    }

    #[rstest]
    #[tokio::test]
    async fn insert_stamps_equal_timestamps(clock: Arc<MutableClock>) {
        let amenities = lifecycle(clock.clone(), Arc::new(NoOpCreateObserver));
        let guard = amenities.lock().await;

        let created = amenities
            .insert(guard, |meta| Amenity::new(meta, draft("WiFi")))
            .await
            .expect("insert succeeds");

        let meta = created.metadata();
        assert_eq!(meta.created_at(), clock.utc());
        assert_eq!(meta.created_at(), meta.updated_at());
        assert_eq!(amenities.get(created.id()).await.expect("stored"), created);
    }

    #[rstest]
    #[tokio::test]
    async fn replace_refreshes_updated_at(clock: Arc<MutableClock>) {
        let amenities = lifecycle(clock.clone(), Arc::new(NoOpCreateObserver));
        let guard = amenities.lock().await;
        let created = amenities
            .insert(guard, |meta| Amenity::new(meta, draft("Pool")))
            .await
            .expect("insert succeeds");

        clock.advance_seconds(30);
        let guard = amenities.lock().await;
        let updated = amenities
            .replace(&guard, created.clone())
            .await
            .expect("replace succeeds");

        assert_eq!(updated.metadata().created_at(), created.metadata().created_at());
        assert!(updated.metadata().updated_at() > created.metadata().updated_at());
    }

    #[rstest]
    #[tokio::test]
    async fn remove_twice_reports_not_found(clock: Arc<MutableClock>) {
        let amenities = lifecycle(clock, Arc::new(NoOpCreateObserver));
        let guard = amenities.lock().await;
        let created = amenities
            .insert(guard, |meta| Amenity::new(meta, draft("Sauna")))
            .await
            .expect("insert succeeds");

        let guard = amenities.lock().await;
        amenities
            .remove(&guard, created.id())
            .await
            .expect("first delete succeeds");
        let err = amenities
            .remove(&guard, created.id())
            .await
            .expect_err("second delete fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn observer_receives_serialised_record(clock: Arc<MutableClock>) {
        let mut observer = MockCreateObserver::new();
        observer
            .expect_record_created()
            .withf(|kind, record| {
                *kind == EntityKind::Amenity && record.get("name") == Some(&json!("Gym"))
            })
            .times(1)
            .return_once(|_, _| Ok(()));
        let amenities = lifecycle(clock, Arc::new(observer));

        let guard = amenities.lock().await;
        amenities
            .insert(guard, |meta| Amenity::new(meta, draft("Gym")))
            .await
            .expect("insert succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn observer_failures_do_not_fail_inserts(clock: Arc<MutableClock>) {
        let mut observer = MockCreateObserver::new();
        observer
            .expect_record_created()
            .times(1)
            .return_once(|_, _| Err(CreateObserverError::io("disk full")));
        let amenities = lifecycle(clock, Arc::new(observer));

        let guard = amenities.lock().await;
        let created = amenities
            .insert(guard, |meta| Amenity::new(meta, draft("Spa")))
            .await
            .expect("insert still succeeds");
        assert!(amenities.find(created.id()).await.expect("read").is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn store_failures_surface_as_service_unavailable(clock: Arc<MutableClock>) {
        let amenities: Lifecycle<Amenity> =
            Lifecycle::new(Arc::new(FailingStore), clock, Arc::new(NoOpCreateObserver));

        let err = amenities.list().await.expect_err("store offline");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
