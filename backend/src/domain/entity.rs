//! Identity and bookkeeping shared by every marketplace record.
//!
//! Each record carries an immutable [`EntityId`] plus creation and update
//! timestamps held in [`Metadata`]. The [`Entity`] trait ties a record type
//! to its [`EntityKind`] so generic machinery (stores, the lifecycle engine,
//! the persistence collaborator) can name it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier assigned to a record at creation.
///
/// # Examples
/// ```
/// use hbnb::domain::EntityId;
///
/// let id = EntityId::random();
/// let parsed: EntityId = id.to_string().parse().expect("valid id");
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The six record types managed by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Country,
    City,
    User,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    /// Every kind, in dependency order (referenced kinds first).
    pub const ALL: [Self; 6] = [
        Self::Country,
        Self::City,
        Self::User,
        Self::Amenity,
        Self::Place,
        Self::Review,
    ];

    /// Capitalised type name, used as the top-level key of data files.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::City => "City",
            Self::User => "User",
            Self::Amenity => "Amenity",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }

    /// Lowercase stem of the data file holding records of this kind.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::EntityKind;
    ///
    /// assert_eq!(EntityKind::Amenity.file_stem(), "amenity");
    /// ```
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::City => "city",
            Self::User => "user",
            Self::Amenity => "amenity",
            Self::Place => "place",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Identifier and timestamps common to all records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    id: EntityId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Metadata {
    /// Bookkeeping for a record created at `now`.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            id: EntityId::random(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild metadata read back from storage.
    pub fn restore(id: EntityId, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a mutation at `now`.
    ///
    /// `updated_at` always moves forward, even if the clock has not, and
    /// saturates at the latest representable instant.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        let next = self
            .updated_at
            .checked_add_signed(TimeDelta::nanoseconds(1))
            .unwrap_or(self.updated_at);
        self.updated_at = now.max(next);
    }
}

/// A validated, identified marketplace record.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Kind tag used for logging, error messages and persistence.
    const KIND: EntityKind;

    fn metadata(&self) -> &Metadata;

    fn metadata_mut(&mut self) -> &mut Metadata;

    fn id(&self) -> &EntityId {
        self.metadata().id()
    }

    /// Value no two records of this kind may share, if the kind has one.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

/// Serde helpers for record timestamps.
///
/// Timestamps are written as RFC 3339 strings. Reading additionally accepts
/// floating-point Unix epoch seconds, the format of legacy data files.
pub(crate) mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(DateTime<Utc>),
        Epoch(f64),
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Text(value) => Ok(value),
            Raw::Epoch(seconds) => from_epoch_seconds(seconds)
                .ok_or_else(|| D::Error::custom(format!("timestamp {seconds} is out of range"))),
        }
    }

    fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1_000_000_000.0).round();
        // Saturate the rounding edge so 0.9999999999 does not overflow a second.
        let nanos = nanos.min(999_999_999.0);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "values are range-checked by DateTime::from_timestamp"
        )]
        let (whole, nanos) = (whole as i64, nanos as u32);
        DateTime::from_timestamp(whole, nanos)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rstest::rstest;
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize")]
            at: DateTime<Utc>,
        }

        #[rstest]
        #[case(serde_json::json!({ "at": "2024-03-01T12:00:00Z" }), 1_709_294_400)]
        #[case(serde_json::json!({ "at": 1_709_294_400.25 }), 1_709_294_400)]
        #[case(serde_json::json!({ "at": 0 }), 0)]
        fn accepts_text_and_epoch_forms(#[case] input: serde_json::Value, #[case] secs: i64) {
            let holder: Holder = serde_json::from_value(input).expect("timestamp parses");
            assert_eq!(holder.at.timestamp(), secs);
        }

        #[rstest]
        fn keeps_fractional_epoch_seconds() {
            let holder: Holder =
                serde_json::from_value(serde_json::json!({ "at": 10.5 })).expect("parses");
            assert_eq!(holder.at.timestamp_subsec_millis(), 500);
        }

        #[rstest]
        fn rejects_non_timestamps() {
            let result = serde_json::from_value::<Holder>(serde_json::json!({ "at": "yesterday" }));
            assert!(result.is_err());
        }
    }
}
