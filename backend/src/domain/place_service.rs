//! Lifecycle rules for places.

use std::sync::Arc;

use async_trait::async_trait;

use super::city::City;
use super::entity::EntityId;
use super::error::Error;
use super::fields::FieldMap;
use super::integrity::require_reference;
use super::lifecycle::Lifecycle;
use super::place::{Place, PlaceDraft, PlacePatch};
use super::ports::{EntityService, Store};
use super::user::User;

/// Place create/update/delete.
///
/// `city_id` and the host must resolve; amenity ids are kept as given.
pub struct PlaceService {
    places: Lifecycle<Place>,
    cities: Arc<dyn Store<City>>,
    users: Arc<dyn Store<User>>,
}

impl PlaceService {
    pub fn new(
        places: Lifecycle<Place>,
        cities: Arc<dyn Store<City>>,
        users: Arc<dyn Store<User>>,
    ) -> Self {
        Self {
            places,
            cities,
            users,
        }
    }

    async fn check_references(
        &self,
        fields: &FieldMap,
        city_id: Option<&EntityId>,
        host_user_id: Option<&EntityId>,
    ) -> Result<(), Error> {
        if let Some(city_id) = city_id {
            require_reference(self.cities.as_ref(), "city_id", city_id).await?;
        }
        if let Some(host_user_id) = host_user_id {
            let field = PlacePatch::host_key(fields);
            require_reference(self.users.as_ref(), field, host_user_id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl EntityService<Place> for PlaceService {
    async fn create(&self, fields: FieldMap) -> Result<Place, Error> {
        let draft = PlaceDraft::from_fields(&fields)?;
        let guard = self.places.lock().await;
        self.check_references(&fields, Some(&draft.city_id), Some(&draft.host_user_id))
            .await?;
        self.places
            .insert(guard, |meta| Place::new(meta, draft))
            .await
    }

    async fn get(&self, id: &EntityId) -> Result<Place, Error> {
        self.places.get(id).await
    }

    async fn list(&self) -> Result<Vec<Place>, Error> {
        self.places.list().await
    }

    async fn update(&self, id: &EntityId, fields: FieldMap) -> Result<Place, Error> {
        let guard = self.places.lock().await;
        let mut place = self.places.get(id).await?;
        let patch = PlacePatch::from_fields(&fields)?;
        self.check_references(&fields, patch.city_id.as_ref(), patch.host_user_id.as_ref())
            .await?;
        place.apply(patch);
        self.places.replace(&guard, place).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        let guard = self.places.lock().await;
        self.places.remove(&guard, id).await
    }
}
