//! Lifecycle rules for amenities.

use async_trait::async_trait;

use super::amenity::{Amenity, AmenityDraft, AmenityPatch};
use super::entity::{Entity, EntityId};
use super::error::Error;
use super::fields::FieldMap;
use super::lifecycle::{Lifecycle, WriteGuard};
use super::ports::EntityService;
use super::validation::AmenityName;

/// Amenity create/update/delete with globally unique names.
///
/// Names are compared exactly, so `WiFi` and `wifi` may coexist.
pub struct AmenityService {
    amenities: Lifecycle<Amenity>,
}

impl AmenityService {
    pub fn new(amenities: Lifecycle<Amenity>) -> Self {
        Self { amenities }
    }

    async fn ensure_name_free(
        &self,
        _guard: &WriteGuard<'_>,
        name: &AmenityName,
        own_id: Option<&EntityId>,
    ) -> Result<(), Error> {
        let taken = self
            .amenities
            .list()
            .await?
            .iter()
            .any(|amenity| amenity.name() == name && Some(amenity.id()) != own_id);
        if taken {
            return Err(Error::conflict("Amenity name must be unique"));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityService<Amenity> for AmenityService {
    async fn create(&self, fields: FieldMap) -> Result<Amenity, Error> {
        let draft = AmenityDraft::from_fields(&fields)?;
        let guard = self.amenities.lock().await;
        self.ensure_name_free(&guard, &draft.name, None).await?;
        self.amenities
            .insert(guard, |meta| Amenity::new(meta, draft))
            .await
    }

    async fn get(&self, id: &EntityId) -> Result<Amenity, Error> {
        self.amenities.get(id).await
    }

    async fn list(&self) -> Result<Vec<Amenity>, Error> {
        self.amenities.list().await
    }

    async fn update(&self, id: &EntityId, fields: FieldMap) -> Result<Amenity, Error> {
        let guard = self.amenities.lock().await;
        let mut amenity = self.amenities.get(id).await?;
        let patch = AmenityPatch::from_fields(&fields)?;
        if let Some(name) = &patch.name {
            self.ensure_name_free(&guard, name, Some(id)).await?;
        }
        amenity.apply(patch);
        self.amenities.replace(&guard, amenity).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        let guard = self.amenities.lock().await;
        self.amenities.remove(&guard, id).await
    }
}
