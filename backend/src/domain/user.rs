//! User records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Metadata, timestamp};
use super::error::Error;
use super::fields::{FieldError, FieldMap, Fields, RuleViolation, present};
use super::validation::{Email, Password, PersonName};

/// A marketplace member: host, guest, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserRow", into = "UserRow")]
pub struct User {
    meta: Metadata,
    first_name: PersonName,
    last_name: PersonName,
    email: Email,
    password: Password,
}

impl User {
    pub fn new(meta: Metadata, draft: UserDraft) -> Self {
        let UserDraft {
            first_name,
            last_name,
            email,
            password,
        } = draft;
        Self {
            meta,
            first_name,
            last_name,
            email,
            password,
        }
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Display form used in review digests.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::{Metadata, User, UserDraft};
    /// use serde_json::json;
    ///
    /// let fields = serde_json::from_value(json!({
    ///     "first_name": "Ada",
    ///     "last_name": "Lovelace",
    ///     "email": "ada@x.com",
    ///     "password": "secret1",
    /// }))
    /// .expect("object");
    /// let user = User::new(
    ///     Metadata::fresh(chrono::Utc::now()),
    ///     UserDraft::from_fields(&fields).expect("valid user"),
    /// );
    /// assert_eq!(user.full_name(), "Ada Lovelace");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            first_name,
            last_name,
            email,
            password,
        } = patch;
        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(password) = password {
            self.password = password;
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn metadata(&self) -> &Metadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password: Password,
}

impl UserDraft {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        fields.require(&["first_name", "last_name", "email", "password"])?;
        let patch = UserPatch::read(fields)?;
        Ok(Self {
            first_name: present("first_name", patch.first_name)?,
            last_name: present("last_name", patch.last_name)?,
            email: present("email", patch.email)?,
            password: present("password", patch.password)?,
        })
    }
}

/// Validated partial update for a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<Email>,
    pub password: Option<Password>,
}

impl UserPatch {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        Ok(Self::read(Fields::new(map))?)
    }

    fn read(fields: Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            first_name: fields.string_with("first_name", PersonName::new)?,
            last_name: fields.string_with("last_name", PersonName::new)?,
            email: fields.string_with("email", Email::new)?,
            password: fields.string_with("password", Password::new)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRow {
    id: EntityId,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: DateTime<Utc>,
}

impl From<User> for UserRow {
    fn from(value: User) -> Self {
        Self {
            id: *value.meta.id(),
            created_at: value.meta.created_at(),
            updated_at: value.meta.updated_at(),
            first_name: value.first_name.into(),
            last_name: value.last_name.into(),
            email: value.email.into(),
            password: value.password.into(),
        }
    }
}

fn checked<T>(
    field: &'static str,
    raw: String,
    rule: impl FnOnce(String) -> Result<T, RuleViolation>,
) -> Result<T, FieldError> {
    rule(raw.clone()).map_err(|violation| FieldError::new(field, violation, raw))
}

impl TryFrom<UserRow> for User {
    type Error = FieldError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            meta: Metadata::restore(row.id, row.created_at, row.updated_at),
            first_name: checked("first_name", row.first_name, PersonName::new)?,
            last_name: checked("last_name", row.last_name, PersonName::new)?,
            email: checked("email", row.email, Email::new)?,
            // Masked: never copy a password into error details.
            password: Password::new(row.password)
                .map_err(|violation| FieldError::new("password", violation, "***"))?,
        })
    }
}
