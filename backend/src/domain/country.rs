//! Country records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Metadata, timestamp};
use super::error::Error;
use super::fields::{FieldError, FieldMap, Fields, present};
use super::validation::{AlphaName, CountryCode};

/// A country, identified to users by its two-letter code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CountryRow", into = "CountryRow")]
pub struct Country {
    meta: Metadata,
    name: AlphaName,
    code: CountryCode,
}

impl Country {
    pub fn new(meta: Metadata, draft: CountryDraft) -> Self {
        Self {
            meta,
            name: draft.name,
            code: draft.code,
        }
    }

    pub fn name(&self) -> &AlphaName {
        &self.name
    }

    pub fn code(&self) -> &CountryCode {
        &self.code
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: CountryPatch) {
        let CountryPatch { name, code } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(code) = code {
            self.code = code;
        }
    }
}

impl Entity for Country {
    const KIND: EntityKind = EntityKind::Country;

    fn metadata(&self) -> &Metadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }
    fn unique_key(&self) -> Option<String> {
        Some(self.code.as_str().to_owned())
    }
}

/// Validated input for creating a country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDraft {
    pub name: AlphaName,
    pub code: CountryCode,
}

impl CountryDraft {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        fields.require(&["name", "code"])?;
        Ok(Self {
            name: present("name", fields.string_with("name", AlphaName::new)?)?,
            code: present("code", fields.string_with("code", CountryCode::new)?)?,
        })
    }
}

/// Validated partial update for a country.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryPatch {
    pub name: Option<AlphaName>,
    pub code: Option<CountryCode>,
}

impl CountryPatch {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        Ok(Self {
            name: fields.string_with("name", AlphaName::new)?,
            code: fields.string_with("code", CountryCode::new)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CountryRow {
    id: EntityId,
    name: String,
    code: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: DateTime<Utc>,
}

impl From<Country> for CountryRow {
    fn from(value: Country) -> Self {
        Self {
            id: *value.meta.id(),
            created_at: value.meta.created_at(),
            updated_at: value.meta.updated_at(),
            name: value.name.into(),
            code: value.code.into(),
        }
    }
}

impl TryFrom<CountryRow> for Country {
    type Error = FieldError;

    fn try_from(row: CountryRow) -> Result<Self, Self::Error> {
        let name = AlphaName::new(row.name.clone())
            .map_err(|violation| FieldError::new("name", violation, row.name))?;
        let code = CountryCode::new(row.code.clone())
            .map_err(|violation| FieldError::new("code", violation, row.code))?;
        Ok(Self {
            meta: Metadata::restore(row.id, row.created_at, row.updated_at),
            name,
            code,
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
    fn draft_keeps_code_verbatim() {
        let draft = CountryDraft::from_fields(&fields(json!({ "name": "Australia", "code": "AU" })))
            .expect("valid country");
        assert_eq!(draft.code.as_str(), "AU");
    }

    #[rstest]
    #[case(json!({ "code": "AU" }), "name")]
    #[case(json!({ "name": "Australia" }), "code")]
    #[case(json!({}), "name")]
    fn draft_names_first_missing_field(#[case] input: serde_json::Value, #[case] field: &str) {
        let err = CountryDraft::from_fields(&fields(input)).expect_err("missing field");
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.field(), Some(field));
    }

    #[rstest]
    #[case("us")]
    #[case("USA")]
    #[case("U1")]
    fn draft_rejects_malformed_codes(#[case] code: &str) {
        let err = CountryDraft::from_fields(&fields(json!({ "name": "Nowhere", "code": code })))
            .expect_err("bad code");
        assert_eq!(err.code(), ErrorCode::InvalidField);
        assert_eq!(err.field(), Some("code"));
    }

    #[rstest]
    fn row_round_trip_preserves_fields() {
        let now = Utc::now();
        let country = Country::new(
            Metadata::fresh(now),
            CountryDraft::from_fields(&fields(json!({ "name": "Chile", "code": "CL" })))
                .expect("valid country"),
        );
        let value = serde_json::to_value(&country).expect("serialises");
        assert_eq!(value.get("code"), Some(&json!("CL")));
        let back: Country = serde_json::from_value(value).expect("deserialises");
        assert_eq!(back, country);
    }

    #[rstest]
    fn rows_with_invalid_values_are_rejected() {
        let row = json!({
            "id": EntityId::random(),
            "name": "Chile",
            "code": "chl",
            "created_at": 1_700_000_000.0,
            "updated_at": 1_700_000_000.0,
        });
        assert!(serde_json::from_value::<Country>(row).is_err());
    }
}
