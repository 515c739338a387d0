//! City records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Metadata, timestamp};
use super::error::Error;
use super::fields::{FieldError, FieldMap, Fields, present};
use super::validation::{AlphaName, CountryCode};

/// A city belonging to exactly one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CityRow", into = "CityRow")]
pub struct City {
    meta: Metadata,
    name: AlphaName,
    country_id: EntityId,
}

impl City {
    pub fn new(meta: Metadata, name: AlphaName, country_id: EntityId) -> Self {
        Self {
            meta,
            name,
            country_id,
        }
    }

    pub fn name(&self) -> &AlphaName {
        &self.name
    }

    pub fn country_id(&self) -> &EntityId {
        &self.country_id
    }

    /// Overwrite the name and/or country; `country_id` must already be resolved.
    pub fn apply(&mut self, name: Option<AlphaName>, country_id: Option<EntityId>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(country_id) = country_id {
            self.country_id = country_id;
        }
    }
}

impl Entity for City {
    const KIND: EntityKind = EntityKind::City;

    fn metadata(&self) -> &Metadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }
    fn unique_key(&self) -> Option<String> {
        Some(format!("{}/{}", self.country_id, self.name.as_str()))
    }
}

/// How a city names its country in input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryRef {
    /// `country_id`: the country's identifier.
    Id(EntityId),
    /// `country_code`: the country's two-letter code.
    Code(CountryCode),
}

impl CountryRef {
    /// Field name the reference was read from.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Id(_) => "country_id",
            Self::Code(_) => "country_code",
        }
    }

    fn read(fields: Fields<'_>) -> Result<Option<Self>, FieldError> {
        // An explicit id wins over a code when both are supplied.
        if let Some(id) = fields.reference("country_id", EntityKind::Country)? {
            return Ok(Some(Self::Id(id)));
        }
        Ok(fields
            .string_with("country_code", CountryCode::new)?
            .map(Self::Code))
    }
}

/// Validated input for creating a city. The country is not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CityDraft {
    pub name: AlphaName,
    pub country: CountryRef,
}

impl CityDraft {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        fields.require(&["name"])?;
        if fields.first_present(&["country_id", "country_code"]).is_none() {
            return Err(Error::missing_field("country_id"));
        }
        Ok(Self {
            name: present("name", fields.string_with("name", AlphaName::new)?)?,
            country: present("country_id", CountryRef::read(fields)?)?,
        })
    }
}

/// Validated partial update for a city.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityPatch {
    pub name: Option<AlphaName>,
    pub country: Option<CountryRef>,
}

impl CityPatch {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        Ok(Self {
            name: fields.string_with("name", AlphaName::new)?,
            country: CountryRef::read(fields)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CityRow {
    id: EntityId,
    name: String,
    country_id: EntityId,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: DateTime<Utc>,
}

impl From<City> for CityRow {
    fn from(value: City) -> Self {
        Self {
            id: *value.meta.id(),
            created_at: value.meta.created_at(),
            updated_at: value.meta.updated_at(),
            name: value.name.into(),
            country_id: value.country_id,
        }
    }
}

impl TryFrom<CityRow> for City {
    type Error = FieldError;

    fn try_from(row: CityRow) -> Result<Self, Self::Error> {
        let name = AlphaName::new(row.name.clone())
            .map_err(|violation| FieldError::new("name", violation, row.name))?;
        Ok(Self {
            meta: Metadata::restore(row.id, row.created_at, row.updated_at),
            name,
            country_id: row.country_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FieldMap {
        serde_json::from_value(value).expect("object literal")
    }

    #[rstest]
    fn draft_accepts_country_id() {
        let id = EntityId::random();
        let draft = CityDraft::from_fields(&fields(json!({
            "name": "Springfield",
            "country_id": id.to_string(),
        })))
        .expect("valid city");
        assert_eq!(draft.country, CountryRef::Id(id));
    }

    #[rstest]
    fn draft_accepts_country_code_alias() {
        let draft = CityDraft::from_fields(&fields(json!({
            "name": "Springfield",
            "country_code": "US",
        })))
        .expect("valid city");
        assert_eq!(draft.country.field(), "country_code");
    }

    #[rstest]
    fn draft_without_country_reports_country_id() {
        let err = CityDraft::from_fields(&fields(json!({ "name": "Springfield" })))
            .expect_err("country missing");
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.field(), Some("country_id"));
    }

    #[rstest]
    fn draft_rejects_non_identifier_country_id() {
        let err = CityDraft::from_fields(&fields(json!({
            "name": "Springfield",
            "country_id": "nope",
        })))
        .expect_err("bad reference");
        assert_eq!(err.code(), ErrorCode::InvalidField);
        assert_eq!(err.field(), Some("country_id"));
    }

    #[rstest]
    fn patch_leaves_absent_fields_unset() {
        let patch = CityPatch::from_fields(&fields(json!({ "name": "Shelbyville" })))
            .expect("valid patch");
        assert!(patch.country.is_none());
        assert_eq!(patch.name.map(String::from), Some("Shelbyville".to_owned()));
    }
}
