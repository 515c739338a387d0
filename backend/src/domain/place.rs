//! Place listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Metadata, timestamp};
use super::error::Error;
use super::fields::{FieldError, FieldMap, Fields, RuleViolation, present};
use super::validation::{AlphaName, Latitude, Longitude, NightlyPrice, PositiveCount};

/// Input keys accepted for the host reference, preferred first.
const HOST_KEYS: [&str; 2] = ["host_user_id", "host_id"];

/// A rentable listing hosted by a user in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlaceRow", into = "PlaceRow")]
pub struct Place {
    meta: Metadata,
    details: PlaceDraft,
}

impl Place {
    pub fn new(meta: Metadata, draft: PlaceDraft) -> Self {
        Self {
            meta,
            details: draft,
        }
    }

    pub fn name(&self) -> &AlphaName {
        &self.details.name
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn address(&self) -> &str {
        &self.details.address
    }

    pub fn latitude(&self) -> Latitude {
        self.details.latitude
    }

    pub fn longitude(&self) -> Longitude {
        self.details.longitude
    }

    pub fn number_of_rooms(&self) -> PositiveCount {
        self.details.number_of_rooms
    }

    pub fn bathrooms(&self) -> PositiveCount {
        self.details.bathrooms
    }

    pub fn price_per_night(&self) -> NightlyPrice {
        self.details.price_per_night
    }

    pub fn max_guests(&self) -> PositiveCount {
        self.details.max_guests
    }

    pub fn city_id(&self) -> &EntityId {
        &self.details.city_id
    }

    pub fn host_user_id(&self) -> &EntityId {
        &self.details.host_user_id
    }

    /// Amenity ids as supplied; they are not checked against stored amenities.
    pub fn amenities(&self) -> &[String] {
        &self.details.amenities
    }

    pub fn apply(&mut self, patch: PlacePatch) {
        let PlacePatch {
            name,
            description,
            address,
            latitude,
            longitude,
            number_of_rooms,
            bathrooms,
            price_per_night,
            max_guests,
            city_id,
            host_user_id,
            amenities,
        } = patch;
        let details = &mut self.details;
        if let Some(value) = name {
            details.name = value;
        }
        if let Some(value) = description {
            details.description = value;
        }
        if let Some(value) = address {
            details.address = value;
        }
        if let Some(value) = latitude {
            details.latitude = value;
        }
        if let Some(value) = longitude {
            details.longitude = value;
        }
        if let Some(value) = number_of_rooms {
            details.number_of_rooms = value;
        }
        if let Some(value) = bathrooms {
            details.bathrooms = value;
        }
        if let Some(value) = price_per_night {
            details.price_per_night = value;
        }
        if let Some(value) = max_guests {
            details.max_guests = value;
        }
        if let Some(value) = city_id {
            details.city_id = value;
        }
        if let Some(value) = host_user_id {
            details.host_user_id = value;
        }
        if let Some(value) = amenities {
            details.amenities = value;
        }
    }
}

impl Entity for Place {
    const KIND: EntityKind = EntityKind::Place;

    fn metadata(&self) -> &Metadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }
}

/// Validated input for creating a place.
///
/// `city_id` and `host_user_id` are well-formed ids; whether they resolve is
/// checked by the place service.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDraft {
    pub name: AlphaName,
    pub description: String,
    pub address: String,
    pub latitude: Latitude,
    pub longitude: Longitude,
    pub number_of_rooms: PositiveCount,
    pub bathrooms: PositiveCount,
    pub price_per_night: NightlyPrice,
    pub max_guests: PositiveCount,
    pub city_id: EntityId,
    pub host_user_id: EntityId,
    pub amenities: Vec<String>,
}

impl PlaceDraft {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        fields.require(&[
            "name",
            "description",
            "address",
            "latitude",
            "longitude",
            "number_of_rooms",
            "bathrooms",
            "price_per_night",
            "max_guests",
            "city_id",
        ])?;
        if fields.first_present(&HOST_KEYS).is_none() {
            return Err(Error::missing_field("host_user_id"));
        }
        fields.require(&["amenities"])?;

        let patch = PlacePatch::read(fields)?;
        Ok(Self {
            name: present("name", patch.name)?,
            description: present("description", patch.description)?,
            address: present("address", patch.address)?,
            latitude: present("latitude", patch.latitude)?,
            longitude: present("longitude", patch.longitude)?,
            number_of_rooms: present("number_of_rooms", patch.number_of_rooms)?,
            bathrooms: present("bathrooms", patch.bathrooms)?,
            price_per_night: present("price_per_night", patch.price_per_night)?,
            max_guests: present("max_guests", patch.max_guests)?,
            city_id: present("city_id", patch.city_id)?,
            host_user_id: present("host_user_id", patch.host_user_id)?,
            amenities: present("amenities", patch.amenities)?,
        })
    }
}

/// Validated partial update for a place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacePatch {
    pub name: Option<AlphaName>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<Latitude>,
    pub longitude: Option<Longitude>,
    pub number_of_rooms: Option<PositiveCount>,
    pub bathrooms: Option<PositiveCount>,
    pub price_per_night: Option<NightlyPrice>,
    pub max_guests: Option<PositiveCount>,
    pub city_id: Option<EntityId>,
    pub host_user_id: Option<EntityId>,
    pub amenities: Option<Vec<String>>,
}

impl PlacePatch {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        Ok(Self::read(Fields::new(map))?)
    }

    fn read(fields: Fields<'_>) -> Result<Self, FieldError> {
        let host_user_id = match fields.first_present(&HOST_KEYS) {
            Some(key) => fields.reference(key, EntityKind::User)?,
            None => None,
        };
        Ok(Self {
            name: fields.string_with("name", AlphaName::new)?,
            description: fields.string("description")?,
            address: fields.string("address")?,
            latitude: fields.number_with("latitude", Latitude::new)?,
            longitude: fields.number_with("longitude", Longitude::new)?,
            number_of_rooms: fields.integer_with("number_of_rooms", PositiveCount::new)?,
            bathrooms: fields.integer_with("bathrooms", PositiveCount::new)?,
            price_per_night: fields.number_with("price_per_night", NightlyPrice::new)?,
            max_guests: fields.integer_with("max_guests", PositiveCount::new)?,
            city_id: fields.reference("city_id", EntityKind::City)?,
            host_user_id,
            amenities: fields.string_list("amenities")?,
        })
    }

    /// Name of the input key the host reference was read from.
    pub fn host_key(map: &FieldMap) -> &'static str {
        Fields::new(map)
            .first_present(&HOST_KEYS)
            .unwrap_or(HOST_KEYS[0])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlaceRow {
    id: EntityId,
    name: String,
    description: String,
    address: String,
    latitude: f64,
    longitude: f64,
    number_of_rooms: i64,
    bathrooms: i64,
    price_per_night: f64,
    max_guests: i64,
    city_id: EntityId,
    #[serde(alias = "host_id")]
    host_user_id: EntityId,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: DateTime<Utc>,
}

impl From<Place> for PlaceRow {
    fn from(value: Place) -> Self {
        let Place { meta, details } = value;
        Self {
            id: *meta.id(),
            created_at: meta.created_at(),
            updated_at: meta.updated_at(),
            name: details.name.into(),
            description: details.description,
            address: details.address,
            latitude: details.latitude.get(),
            longitude: details.longitude.get(),
            number_of_rooms: i64::from(details.number_of_rooms.get()),
            bathrooms: i64::from(details.bathrooms.get()),
            price_per_night: details.price_per_night.get(),
            max_guests: i64::from(details.max_guests.get()),
            city_id: details.city_id,
            host_user_id: details.host_user_id,
            amenities: details.amenities,
        }
    }
}

fn checked<V, T>(
    field: &'static str,
    raw: V,
    rule: impl FnOnce(V) -> Result<T, RuleViolation>,
) -> Result<T, FieldError>
where
    V: Clone + Into<serde_json::Value>,
{
    rule(raw.clone()).map_err(|violation| FieldError::new(field, violation, raw))
}

impl TryFrom<PlaceRow> for Place {
    type Error = FieldError;

    fn try_from(row: PlaceRow) -> Result<Self, Self::Error> {
        let details = PlaceDraft {
            name: checked("name", row.name, AlphaName::new)?,
            description: row.description,
            address: row.address,
            latitude: checked("latitude", row.latitude, Latitude::new)?,
            longitude: checked("longitude", row.longitude, Longitude::new)?,
            number_of_rooms: checked("number_of_rooms", row.number_of_rooms, PositiveCount::new)?,
            bathrooms: checked("bathrooms", row.bathrooms, PositiveCount::new)?,
            price_per_night: checked("price_per_night", row.price_per_night, NightlyPrice::new)?,
            max_guests: checked("max_guests", row.max_guests, PositiveCount::new)?,
            city_id: row.city_id,
            host_user_id: row.host_user_id,
            amenities: row.amenities,
        };
        Ok(Self {
            meta: Metadata::restore(row.id, row.created_at, row.updated_at),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn valid_input() -> FieldMap {
        serde_json::from_value(json!({
            "name": "Sea View",
            "description": "Quiet flat",
            "address": "1 Beach Road",
            "latitude": -33.9,
            "longitude": 151,
            "number_of_rooms": 2,
            "bathrooms": 1,
            "price_per_night": 120.5,
            "max_guests": 4,
            "city_id": EntityId::random().to_string(),
            "host_user_id": EntityId::random().to_string(),
            "amenities": ["wifi"],
        }))
        .expect("object literal")
    }

    #[rstest]
    fn draft_accepts_complete_input(valid_input: FieldMap) {
        let draft = PlaceDraft::from_fields(&valid_input).expect("valid place");
        assert_eq!(draft.longitude.get(), 151.0);
        assert_eq!(draft.amenities, vec!["wifi".to_owned()]);
    }

    #[rstest]
    fn draft_accepts_host_id_alias(mut valid_input: FieldMap) {
        let host = valid_input.remove("host_user_id").expect("fixture has host");
        valid_input.insert("host_id".to_owned(), host.clone());

        let draft = PlaceDraft::from_fields(&valid_input).expect("valid place");
        assert_eq!(Some(draft.host_user_id.to_string()), host.as_str().map(str::to_owned));
        assert_eq!(PlacePatch::host_key(&valid_input), "host_id");
    }

    #[rstest]
    #[case("latitude", json!(91), "out_of_range")]
    #[case("longitude", json!("east"), "not_a_number")]
    #[case("number_of_rooms", json!(0), "must_be_positive")]
    #[case("bathrooms", json!(1.5), "not_an_integer")]
    #[case("price_per_night", json!(-1), "must_not_be_negative")]
    #[case("max_guests", json!(-2), "must_be_positive")]
    #[case("name", json!("Flat 9"), "invalid_characters")]
    #[case("amenities", json!("wifi"), "not_a_list")]
    fn draft_rejects_invalid_values(
        mut valid_input: FieldMap,
        #[case] field: &str,
        #[case] value: Value,
        #[case] rule: &str,
    ) {
        valid_input.insert(field.to_owned(), value);
        let err = PlaceDraft::from_fields(&valid_input).expect_err("invalid place");
        assert_eq!(err.code(), ErrorCode::InvalidField);
        assert_eq!(err.field(), Some(field));
        assert_eq!(
            err.details().and_then(|details| details.get("code")),
            Some(&json!(rule))
        );
    }

    #[rstest]
    #[case("description")]
    #[case("city_id")]
    #[case("amenities")]
    fn draft_reports_missing_fields(mut valid_input: FieldMap, #[case] field: &str) {
        valid_input.remove(field);
        let err = PlaceDraft::from_fields(&valid_input).expect_err("missing field");
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.field(), Some(field));
    }

    #[rstest]
    fn apply_merges_only_present_fields(valid_input: FieldMap) {
        let mut place = Place::new(
            Metadata::fresh(Utc::now()),
            PlaceDraft::from_fields(&valid_input).expect("valid place"),
        );
        let patch: FieldMap =
            serde_json::from_value(json!({ "max_guests": 6 })).expect("object literal");

        place.apply(PlacePatch::from_fields(&patch).expect("valid patch"));

        assert_eq!(place.max_guests().get(), 6);
        assert_eq!(place.name().as_str(), "Sea View");
        assert_eq!(place.number_of_rooms().get(), 2);
    }

    #[rstest]
    fn legacy_rows_with_host_id_load() {
        let row = json!({
            "id": EntityId::random(),
            "name": "Cabin",
            "description": "",
            "address": "Forest",
            "latitude": 1.0,
            "longitude": 2.0,
            "number_of_rooms": 1,
            "bathrooms": 1,
            "price_per_night": 0,
            "max_guests": 2,
            "city_id": EntityId::random(),
            "host_id": EntityId::random(),
            "created_at": 1_700_000_000.5,
            "updated_at": 1_700_000_000.5,
        });
        let place: Place = serde_json::from_value(row).expect("legacy row loads");
        assert!(place.amenities().is_empty());
    }
}
