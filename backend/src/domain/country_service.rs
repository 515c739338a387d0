//! Lifecycle rules for countries.

use async_trait::async_trait;

use super::country::{Country, CountryDraft, CountryPatch};
use super::entity::{Entity, EntityId};
use super::error::Error;
use super::fields::FieldMap;
use super::lifecycle::{Lifecycle, WriteGuard};
use super::ports::EntityService;
use super::validation::CountryCode;

/// Country create/update/delete with code uniqueness.
pub struct CountryService {
    countries: Lifecycle<Country>,
}

impl CountryService {
    pub fn new(countries: Lifecycle<Country>) -> Self {
        Self { countries }
    }

    async fn ensure_code_free(
        &self,
        _guard: &WriteGuard<'_>,
        code: &CountryCode,
        own_id: Option<&EntityId>,
    ) -> Result<(), Error> {
        let taken = self
            .countries
            .list()
            .await?
            .iter()
            .any(|country| country.code() == code && Some(country.id()) != own_id);
        if taken {
            return Err(Error::conflict("Country code must be unique"));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityService<Country> for CountryService {
    async fn create(&self, fields: FieldMap) -> Result<Country, Error> {
        let draft = CountryDraft::from_fields(&fields)?;
        let guard = self.countries.lock().await;
        self.ensure_code_free(&guard, &draft.code, None).await?;
        self.countries
            .insert(guard, |meta| Country::new(meta, draft))
            .await
    }

    async fn get(&self, id: &EntityId) -> Result<Country, Error> {
        self.countries.get(id).await
    }

    async fn list(&self) -> Result<Vec<Country>, Error> {
        self.countries.list().await
    }

    async fn update(&self, id: &EntityId, fields: FieldMap) -> Result<Country, Error> {
        let guard = self.countries.lock().await;
        let mut country = self.countries.get(id).await?;
        let patch = CountryPatch::from_fields(&fields)?;
        if let Some(code) = &patch.code {
            self.ensure_code_free(&guard, code, Some(id)).await?;
        }
        country.apply(patch);
        self.countries.replace(&guard, country).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        let guard = self.countries.lock().await;
        self.countries.remove(&guard, id).await
    }
}
