//! Amenity records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Metadata, timestamp};
use super::error::Error;
use super::fields::{FieldError, FieldMap, Fields, present};
use super::validation::AmenityName;

/// A feature a place can offer, such as WiFi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AmenityRow", into = "AmenityRow")]
pub struct Amenity {
    meta: Metadata,
    name: AmenityName,
}

impl Amenity {
    pub fn new(meta: Metadata, draft: AmenityDraft) -> Self {
        Self {
            meta,
            name: draft.name,
        }
    }

    pub fn name(&self) -> &AmenityName {
        &self.name
    }

    pub fn apply(&mut self, patch: AmenityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

impl Entity for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    fn metadata(&self) -> &Metadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }
    fn unique_key(&self) -> Option<String> {
        Some(self.name.as_str().to_owned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmenityDraft {
    pub name: AmenityName,
}

impl AmenityDraft {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        fields.require(&["name"])?;
        Ok(Self {
            name: present("name", fields.string_with("name", AmenityName::new)?)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmenityPatch {
    pub name: Option<AmenityName>,
}

impl AmenityPatch {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        Ok(Self {
            name: Fields::new(map).string_with("name", AmenityName::new)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AmenityRow {
    id: EntityId,
    name: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: DateTime<Utc>,
}

impl From<Amenity> for AmenityRow {
    fn from(value: Amenity) -> Self {
        Self {
            id: *value.meta.id(),
            created_at: value.meta.created_at(),
            updated_at: value.meta.updated_at(),
            name: value.name.into(),
        }
    }
}

impl TryFrom<AmenityRow> for Amenity {
    type Error = FieldError;

    fn try_from(row: AmenityRow) -> Result<Self, Self::Error> {
        let name = AmenityName::new(row.name.clone())
            .map_err(|violation| FieldError::new("name", violation, row.name))?;
        Ok(Self {
            meta: Metadata::restore(row.id, row.created_at, row.updated_at),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({ "name": "  " }), ErrorCode::InvalidField)]
    #[case(json!({ "name": 7 }), ErrorCode::InvalidField)]
    #[case(json!({}), ErrorCode::MissingField)]
    fn draft_rejects_unusable_names(#[case] input: serde_json::Value, #[case] code: ErrorCode) {
        let map: FieldMap = serde_json::from_value(input).expect("object literal");
        let err = AmenityDraft::from_fields(&map).expect_err("invalid amenity");
        assert_eq!(err.code(), code);
        assert_eq!(err.field(), Some("name"));
    }
}
