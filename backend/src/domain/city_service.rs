//! Lifecycle rules for cities.

use std::sync::Arc;

use async_trait::async_trait;

use super::city::{City, CityDraft, CityPatch, CountryRef};
use super::country::Country;
use super::entity::{Entity, EntityId, EntityKind};
use super::error::Error;
use super::fields::{FieldMap, unknown_reference};
use super::integrity::require_reference;
use super::lifecycle::{Lifecycle, WriteGuard, map_store_error};
use super::ports::{EntityService, Store};
use super::validation::AlphaName;

/// City create/update/delete.
///
/// Cities must reference an existing country and their names are unique
/// within that country (exact, case-sensitive match).
pub struct CityService {
    cities: Lifecycle<City>,
    countries: Arc<dyn Store<Country>>,
}

impl CityService {
    pub fn new(cities: Lifecycle<City>, countries: Arc<dyn Store<Country>>) -> Self {
        Self { cities, countries }
    }

    async fn resolve_country(&self, country: &CountryRef) -> Result<EntityId, Error> {
        match country {
            CountryRef::Id(id) => {
                require_reference(self.countries.as_ref(), country.field(), id).await?;
                Ok(*id)
            }
            CountryRef::Code(code) => self
                .countries
                .list()
                .await
                .map_err(|err| map_store_error(EntityKind::Country, err))?
                .into_iter()
                .find(|candidate| candidate.code() == code)
                .map(|found| *found.id())
                .ok_or_else(|| {
                    unknown_reference(country.field(), EntityKind::Country, code.as_str())
                }),
        }
    }

    async fn ensure_name_free(
        &self,
        _guard: &WriteGuard<'_>,
        name: &AlphaName,
        country_id: &EntityId,
        own_id: Option<&EntityId>,
    ) -> Result<(), Error> {
        let taken = self.cities.list().await?.iter().any(|city| {
            city.name() == name && city.country_id() == country_id && Some(city.id()) != own_id
        });
        if taken {
            return Err(Error::conflict(
                "City name must be unique within the same country",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityService<City> for CityService {
    async fn create(&self, fields: FieldMap) -> Result<City, Error> {
        let CityDraft { name, country } = CityDraft::from_fields(&fields)?;
        let guard = self.cities.lock().await;
        let country_id = self.resolve_country(&country).await?;
        self.ensure_name_free(&guard, &name, &country_id, None)
            .await?;
        self.cities
            .insert(guard, |meta| City::new(meta, name, country_id))
            .await
    }

    async fn get(&self, id: &EntityId) -> Result<City, Error> {
        self.cities.get(id).await
    }

    async fn list(&self) -> Result<Vec<City>, Error> {
        self.cities.list().await
    }

    async fn update(&self, id: &EntityId, fields: FieldMap) -> Result<City, Error> {
        let guard = self.cities.lock().await;
        let mut city = self.cities.get(id).await?;
        let CityPatch { name, country } = CityPatch::from_fields(&fields)?;
        let country_id = match &country {
            Some(country) => Some(self.resolve_country(country).await?),
            None => None,
        };

        let target_name = name.as_ref().unwrap_or(city.name());
        let target_country = country_id.as_ref().unwrap_or(city.country_id());
        self.ensure_name_free(&guard, target_name, target_country, Some(id))
            .await?;

        city.apply(name, country_id);
        self.cities.replace(&guard, city).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        let guard = self.cities.lock().await;
        self.cities.remove(&guard, id).await
    }
}
